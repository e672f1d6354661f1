mod check;
mod cli;
mod compile;
mod drivers;
mod run;

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Compile(args) => compile::run(args),
        cli::Command::Check(args) => check::run(args),
        cli::Command::Drivers => {
            drivers::run();
            Ok(())
        }
        cli::Command::Run(args) => run::run(args).await,
    }
}
