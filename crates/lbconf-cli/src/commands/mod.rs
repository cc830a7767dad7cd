mod check;
mod dump_keywords;

use check::CheckCmd;
use dump_keywords::DumpKeywordsCmd;

use crate::Cli;
use crate::CommandResult;

#[derive(Debug, clap::Parser)]
#[command(name = "lbconf")]
pub(crate) enum CommandEnum {
    Check(Box<CheckCmd>),
    DumpKeywords(Box<DumpKeywordsCmd>),
}

impl CommandEnum {
    pub(crate) fn run(self, cli: Cli) -> CommandResult {
        use crate::RunnableCommand;
        match self {
            Self::Check(cmd) => cmd.run(cli),
            Self::DumpKeywords(cmd) => cmd.run(cli),
        }
    }
}
