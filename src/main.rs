//! tgrep - grep the Twitter filter stream.
//!
//! Opens the OAuth 1.0a signed `statuses/filter` stream and prints every
//! status in the requested language as `created_at : text / user.name`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tgrep::{Error, OAuthClientProvider, Secrets, StreamError, TweetReaderFuture};

const FILTER_ENDPOINT: &str = "https://stream.twitter.com/1.1/statuses/filter.json";

/// tgrep - grep the Twitter filter stream.
#[derive(Parser, Debug)]
#[command(name = "tgrep", version, about)]
struct Cli {
    /// OAuth consumer key.
    #[arg(long = "conskey", env = "TGREP_CONSUMER_KEY", hide_env_values = true)]
    consumer_key: String,

    /// OAuth consumer secret.
    #[arg(long = "conssecret", env = "TGREP_CONSUMER_SECRET", hide_env_values = true)]
    consumer_secret: String,

    /// OAuth access token.
    #[arg(long = "accesstoken", env = "TGREP_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// OAuth token secret.
    #[arg(long = "tokensecret", env = "TGREP_TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Language to grep data from.
    #[arg(long, default_value = "th-th")]
    lang: String,

    /// Keywords to track, comma separated.
    #[arg(long, default_value = "ครับ")]
    track: String,

    /// Bounding boxes to follow, e.g. `97.97,5.25,105.65,20.35`.
    #[arg(long)]
    locations: Option<String>,

    /// Streaming filter endpoint.
    #[arg(long, default_value = FILTER_ENDPOINT)]
    endpoint: String,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn filter_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if !self.track.is_empty() {
            params.push(("track", self.track.as_str()));
        }
        if let Some(locations) = self.locations.as_deref() {
            params.push(("locations", locations));
        }
        params
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to INFO
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> tgrep::Result<()> {
    let secrets = Secrets::new(cli.consumer_key.as_str(), cli.consumer_secret.as_str())
        .token(cli.access_token.as_str(), cli.token_secret.as_str());
    let params = cli.filter_params();

    tracing::info!(endpoint = %cli.endpoint, track = %cli.track, lang = %cli.lang, "connecting");
    let mut stream = reqwest::Client::new()
        .oauth1(&secrets)
        .post(cli.endpoint.as_str())
        .form(&params)
        .send()
        .tweet_stream()
        .await?;

    while let Some(tweet) = stream.next_tweet().await {
        match tweet {
            Ok(tweet) if tweet.is_status() && tweet.matches_language(&cli.lang) => {
                println!("{} : {} / {}", tweet.created_at, tweet.text, tweet.user.name);
            }
            Ok(tweet) => tracing::trace!(lang = %tweet.lang, "skipped"),
            // the decoder already dropped the record
            Err(Error::Stream(StreamError::Decode(_))) => continue,
            Err(err) => return Err(err),
        }
    }
    tracing::info!("stream closed");
    Ok(())
}
