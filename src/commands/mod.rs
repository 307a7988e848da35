use crate::cli::Command;
use crate::context;

pub mod query;

pub trait CommandRunner {
    fn run(&self, ctx: &context::Context) -> anyhow::Result<()>;
}

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        query::QueryCommand(self).run(ctx)
    }
}
