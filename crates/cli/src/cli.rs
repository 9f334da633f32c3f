use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extlaunch")]
#[command(about = "Launch a browser with an unpacked extension loaded and drive it")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the browser with the extension loaded and navigate to URL
    Open(OpenArgs),

    /// Solve captcha tasks through the HTTP task API
    Solve {
        #[command(subcommand)]
        action: SolveAction,
    },
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Target URL
    pub url: String,

    /// Path to the unpacked extension directory
    #[arg(short, long, value_name = "DIR")]
    pub extension: PathBuf,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Browser executable to launch (discovered when omitted)
    #[arg(long, value_name = "PATH")]
    pub browser: Option<PathBuf>,

    /// Extra flag passed verbatim to the browser (repeatable)
    #[arg(long = "browser-arg", value_name = "FLAG", allow_hyphen_values = true)]
    pub browser_args: Vec<String>,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Keep the session open until Ctrl-C instead of closing right away
    #[arg(long)]
    pub hold: bool,
}

#[derive(Subcommand, Debug)]
pub enum SolveAction {
    /// Solve an AWS WAF token challenge and print the token cookie
    Token(TokenArgs),

    /// Classify AWS WAF challenge images and print the solution
    Image(ImageArgs),
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// URL of the protected site
    #[arg(long, value_name = "URL")]
    pub website: String,

    /// `aws-key` value extracted from the challenge page
    #[arg(long)]
    pub aws_key: String,

    /// `aws-iv` value extracted from the challenge page
    #[arg(long)]
    pub aws_iv: String,

    /// `aws-context` value extracted from the challenge page
    #[arg(long)]
    pub aws_context: String,

    /// Challenge script URL, when the page provides one
    #[arg(long, value_name = "URL")]
    pub challenge_js: Option<String>,

    /// Proxy in scheme:user:pass@ip:port form (switches the task type)
    #[arg(long)]
    pub proxy: Option<String>,

    /// API key for the task API
    #[arg(long, env = "EXTLAUNCH_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Path to a challenge image (repeatable)
    #[arg(long = "image", value_name = "FILE", required = true)]
    pub images: Vec<PathBuf>,

    /// Challenge question, e.g. "aws:grid:chair"
    #[arg(long)]
    pub question: String,

    /// URL of the page displaying the captcha
    #[arg(long, value_name = "URL")]
    pub website: String,

    /// API key for the task API
    #[arg(long, env = "EXTLAUNCH_API_KEY", hide_env_values = true)]
    pub api_key: String,
}
