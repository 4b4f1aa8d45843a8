//! Form and result state for one client session.

use whois_lookup_core::{ContactSummary, DomainSummary, LookupType, Summary};

use crate::api::{ApiClient, ClientError};
use crate::render::{contact_table, domain_table};
use crate::toast::Toast;

pub struct LookupView {
    pub domain: String,
    pub lookup_type: LookupType,
    domain_result: Option<DomainSummary>,
    contact_result: Option<ContactSummary>,
    loading: bool,
    toast: Toast,
    client: ApiClient,
}

impl LookupView {
    pub fn new(client: ApiClient) -> Self {
        Self::with_toast(client, Toast::new())
    }

    pub fn with_toast(client: ApiClient, toast: Toast) -> Self {
        Self {
            domain: String::new(),
            lookup_type: LookupType::default(),
            domain_result: None,
            contact_result: None,
            loading: false,
            toast,
            client,
        }
    }

    /// Send the current form once. Results are kept per lookup type, so a
    /// contact search leaves the last domain table in place.
    pub async fn submit(&mut self) {
        let (domain, lookup_type) = self.begin_submit();
        let result = self.client.lookup(&domain, lookup_type).await;
        self.finish_submit(result);
    }

    /// Enter the loading state and clear the previous error. Returns the
    /// domain and type to send; the caller hands the outcome to
    /// [`LookupView::finish_submit`].
    pub fn begin_submit(&mut self) -> (String, LookupType) {
        self.loading = true;
        self.toast.dismiss();
        (self.domain.clone(), self.lookup_type)
    }

    pub fn finish_submit(&mut self, result: Result<Summary, ClientError>) {
        match result {
            Ok(Summary::Domain(summary)) => self.domain_result = Some(summary),
            Ok(Summary::Contact(summary)) => self.contact_result = Some(summary),
            Err(error) => {
                tracing::debug!(%error, "lookup failed");
                self.toast.show(error.to_string());
            }
        }

        self.loading = false;
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            "Search"
        }
    }

    pub fn domain_result(&self) -> Option<&DomainSummary> {
        self.domain_result.as_ref()
    }

    pub fn contact_result(&self) -> Option<&ContactSummary> {
        self.contact_result.as_ref()
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    pub fn render(&self) -> String {
        let mut sections = vec![self.lookup_type.label().to_string()];

        let table = match self.lookup_type {
            LookupType::Domain => self.domain_result.as_ref().map(domain_table),
            LookupType::Contact => self.contact_result.as_ref().map(contact_table),
        };
        sections.extend(table);

        if let Some(message) = self.toast.message() {
            sections.push(format!("[error] {message}"));
        }

        sections.join("\n")
    }
}
