// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

use crate::models::{TxType, TypeFilter};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn type_filter_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(|s: &str| s.parse::<TypeFilter>())
        .help("credit | debit | all (default all)")
}

pub fn build_cli() -> Command {
    Command::new("inex")
        .about("Income/expense tracker: monthly earnings, expenditure and running savings")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("signup")
                .about("Register a new user")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(
                    Arg::new("confirm")
                        .long("confirm")
                        .required(true)
                        .help("Repeat the password"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and remember the session")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("tx")
                .about("Enter and list transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction, or replace one with --id")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .value_parser(value_parser!(u32).range(1..=12)),
                        )
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(|s: &str| s.parse::<TxType>())
                                .help("credit | debit"),
                        )
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Existing transaction id to replace"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .arg(type_filter_arg())
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .requires("year")
                                .value_parser(value_parser!(u32).range(1..=12)),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Monthly earnings, expenditure and savings for a year")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Defaults to the current year"),
                )
                .arg(type_filter_arg())
                .arg(
                    Arg::new("details")
                        .long("details")
                        .action(ArgAction::SetTrue)
                        .help("Also show each month's transactions"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Write all transactions to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Client settings")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print effective settings"))
                .subcommand(
                    Command::new("set-url")
                        .about("Set the transaction store API url")
                        .arg(Arg::new("url").required(true)),
                ),
        )
}
