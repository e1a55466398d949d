//! Cross-scenario session state.

/// Credentials of the company account created during the run.
#[derive(Debug, Clone)]
pub struct CompanyCredentials {
    pub username: String,
    pub password: String,
    pub company_name: String,
}

/// Data retained across scenarios within a single run.
///
/// Mutated by scenarios as side effects of successful calls; later
/// scenarios read it to chain onto earlier ones. Discarded at exit.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Bearer token of the seeded admin account
    pub admin_token: Option<String>,
    /// Bearer token of the company account created by this run
    pub company_token: Option<String>,
    /// User id of the created company account
    pub company_user_id: Option<String>,
    /// Id of the order created by this run
    pub order_id: Option<String>,
    /// Generated credentials of the created company account
    pub company_credentials: Option<CompanyCredentials>,
}
