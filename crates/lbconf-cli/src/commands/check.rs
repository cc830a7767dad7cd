use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        help = "Path to a configuration file, or a directory of them (every \
               file directly inside is checked, non-recursively).",
        name = "PATH"
    )]
    path: PathBuf,

    #[arg(help = "System id to evaluate @id / @^id filters against.", long)]
    config_id: Option<String>,

    #[arg(
        default_value_t = 4096,
        help = "Maximum logical line length after macro expansion.",
        long
    )]
    max_buf: usize,
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub fn run(self, _cli: Cli) -> CommandResult {
        let pattern = if self.path.is_dir() {
            self.path.join("*").to_string_lossy().into_owned()
        } else {
            self.path.to_string_lossy().into_owned()
        };

        let matches: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let tree = crate::demo_grammar::build(matches.clone());

        match lbconf::load(&tree, self.config_id, self.max_buf, &pattern) {
            Ok(()) => {
                let matches = matches.lock().unwrap();
                if matches.is_empty() {
                    CommandResult::stdout(format_args!(
                        "{} No recognized directives matched against {pattern}.",
                        output_utils::GREEN_CHECK,
                    ))
                } else {
                    CommandResult::stdout(format_args!(
                        "{} {} directive(s) matched against {pattern}:\n{}",
                        output_utils::GREEN_CHECK,
                        matches.len(),
                        matches.join("\n"),
                    ))
                }
            }
            Err(e @ lbconf::Error::MissingParameter { .. }) => CommandResult {
                exit_code: std::process::ExitCode::from(crate::EXIT_CONFIG_ERROR),
                stderr: Some(format!("{} {pattern}: {e}", output_utils::RED_X)),
                stdout: None,
            },
            Err(e) => CommandResult::stderr(format_args!(
                "{} Failed to check {pattern}: {e}",
                output_utils::RED_X,
            )),
        }
    }
}
