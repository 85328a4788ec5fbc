use clap::{
    crate_authors,
    crate_description,
    crate_name,
    crate_version,
    Args,
    Parser,
};

mod server;

#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the marketplace server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    /// Secret used to sign and verify the bearer credentials issued by the
    /// /jwt endpoint.
    #[arg(long = "access-token-secret")]
    #[arg(env = "ACCESS_TOKEN_SECRET")]
    pub access_token_secret: String,
}
