//! Tests for the generate subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_generate_minimal() {
    match parse(&["genpass", "generate", "example.com"]) {
        CliCommand::Generate(args) => {
            assert_eq!(args.domain, "example.com");
            assert!(args.length.is_none());
            assert!(args.method.is_none());
            assert!(args.password.is_none());
            assert_eq!(args.disable_tld, None);
        }
        _ => panic!("expected Generate"),
    }
}

#[test]
fn cli_parse_generate_all_flags() {
    match parse(&[
        "genpass",
        "generate",
        "https://login.example.com/",
        "--length",
        "16",
        "--method",
        "bcrypt",
        "--cost",
        "10",
        "--counter",
        "2",
        "--secret",
        "pepper",
        "--disable-tld",
        "--password",
        "master",
    ]) {
        CliCommand::Generate(args) => {
            assert_eq!(args.domain, "https://login.example.com/");
            assert_eq!(args.length.as_deref(), Some("16"));
            assert_eq!(args.method.as_deref(), Some("bcrypt"));
            assert_eq!(args.cost.as_deref(), Some("10"));
            assert_eq!(args.counter.as_deref(), Some("2"));
            assert_eq!(args.secret.as_deref(), Some("pepper"));
            assert_eq!(args.disable_tld, Some(true));
            assert_eq!(args.password.as_deref(), Some("master"));
        }
        _ => panic!("expected Generate with flags"),
    }
}

#[test]
fn cli_parse_generate_disable_tld_false() {
    match parse(&["genpass", "generate", "login.example.com", "--disable-tld=false"]) {
        CliCommand::Generate(args) => {
            assert_eq!(args.domain, "login.example.com");
            assert_eq!(args.disable_tld, Some(false));
        }
        _ => panic!("expected Generate with --disable-tld=false"),
    }
}

#[test]
fn cli_generate_requires_domain() {
    assert!(Cli::try_parse_from(["genpass", "generate"]).is_err());
}
