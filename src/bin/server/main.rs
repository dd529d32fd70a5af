#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Admin server that sends test mails from the store's sender identities

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use simple_mail::{
    domain::communication::test_mail::TestMailServiceImpl,
    infrastructure::{
        config::json::{JsonStoreConfig, StoreConfigDetails},
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{state::AppState, HttpServer, HttpServerConfig},
    },
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Where the store configuration lives
    #[clap(flatten)]
    pub store: StoreConfigDetails,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let store_config = Arc::new(JsonStoreConfig::load(&args.store)?);
    let mailer = Arc::new(SMTPMailer::new(args.smtp));

    let state = AppState::new(TestMailServiceImpl::new(store_config, mailer));

    HttpServer::new(state, args.server).await?.run().await
}
