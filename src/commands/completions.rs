use clap::CommandFactory;
use clap_complete::{Shell, generate};

/// Print shell completions to stdout
pub fn completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "apk-hub", &mut std::io::stdout());
}
