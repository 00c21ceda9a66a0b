//! CLI parse tests.

use super::{Cli, CliCommand, ExtractArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn parse_extract(args: &[&str]) -> ExtractArgs {
    match parse(args) {
        CliCommand::Extract(args) => args,
        _ => panic!("expected Extract"),
    }
}

mod extract;
