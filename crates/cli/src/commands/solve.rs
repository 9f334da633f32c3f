use tracing::info;

use crate::cli::{ImageArgs, SolveAction, TokenArgs};
use crate::error::Result;
use extlaunch_solver::{AwsWafImageTask, AwsWafTokenTask, SolverClient, encode_image};

pub async fn execute(action: SolveAction) -> Result<()> {
    match action {
        SolveAction::Token(args) => token(args).await,
        SolveAction::Image(args) => image(args).await,
    }
}

async fn token(args: TokenArgs) -> Result<()> {
    let client = SolverClient::new(args.api_key);
    let task = AwsWafTokenTask {
        website_url: args.website,
        aws_key: args.aws_key,
        aws_iv: args.aws_iv,
        aws_context: args.aws_context,
        aws_challenge_js: args.challenge_js,
        aws_api_js: None,
        proxy: args.proxy,
    };

    let cookie = client.solve_aws_waf_token(task).await?;
    info!(target = "extlaunch", "token obtained");
    // The cookie is the command's product; print it bare for piping.
    println!("{cookie}");
    Ok(())
}

async fn image(args: ImageArgs) -> Result<()> {
    let client = SolverClient::new(args.api_key);
    let images = args
        .images
        .iter()
        .map(|path| encode_image(path))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let task = AwsWafImageTask {
        website_url: args.website,
        images,
        question: args.question,
    };

    let solution = client.classify_images(task).await?;
    println!("{}", serde_json::to_string_pretty(&solution)?);
    Ok(())
}
