use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use simple_mail::{
    domain::communication::mail::Mail,
    infrastructure::email::smtp::{SMTPConfig, SMTPMailer},
};

/// Sends a single message over SMTP
#[derive(Debug, Parser)]
pub struct Args {
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub from_name: Option<String>,

    #[arg(long, required = true)]
    pub to: Vec<String>,

    #[arg(long)]
    pub cc: Vec<String>,

    #[arg(long)]
    pub bcc: Vec<String>,

    /// Extra header lines, e.g. `X-Priority: 1`
    #[arg(long)]
    pub header: Vec<String>,

    #[arg(long, default_value = "text/plain")]
    pub content_type: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub body: String,
}

#[tokio::main]
pub async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut mail = Mail::new(Arc::new(SMTPMailer::new(args.smtp)));

    mail.add_sender(&args.from, args.from_name.as_deref());

    for to in &args.to {
        mail.add_receiver(to, None);
    }

    for cc in &args.cc {
        mail.add_copy_receiver(cc, None);
    }

    for bcc in &args.bcc {
        mail.add_blind_copy_receiver(bcc, None);
    }

    for header in &args.header {
        mail.add_additional_header(header, None);
    }

    mail.set_type(&args.content_type);
    mail.set_subject(&args.subject);
    mail.set_body(&args.body);

    let message = mail.send().await?;

    println!(
        "Sent \"{}\" to {} recipient(s)",
        message.subject(),
        message.to().len() + message.cc().len() + message.bcc().len()
    );

    Ok(())
}
