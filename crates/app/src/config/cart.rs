//! Cart & Session Config

use clap::Args;

use crate::domain::carts::MergePolicy;

/// Cart and session settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// What to do with a guest cart on sign-in when a saved cart exists
    #[arg(
        long,
        env = "CART_MERGE_POLICY",
        value_enum,
        default_value_t = MergePolicy::RemoteWins
    )]
    pub merge_policy: MergePolicy,

    /// Comma separated e-mails that sign in as administrators
    #[arg(long, env = "VITRINA_ADMIN_EMAILS", value_delimiter = ',')]
    pub admin_emails: Vec<String>,

    /// Signed-in e-mail for this invocation; guest when omitted
    #[arg(long, env = "VITRINA_USER")]
    pub user: Option<String>,
}
