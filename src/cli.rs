// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .required(required)
        .help("Month as YYYY-MM (defaults to the current month)")
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("amount").long("amount").required(required))
        .arg(Arg::new("category").long("category").required(required))
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD (defaults to today)"),
        )
        .arg(Arg::new("note").long("note"))
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["expense", "income"]),
        )
        .arg(
            Arg::new("payment")
                .long("payment")
                .help("Cash, UPI, Card, Bank Transfer, Other"),
        )
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .value_parser(["none", "daily", "weekly", "monthly"]),
        )
}

pub fn build_cli() -> Command {
    Command::new("studentbudget")
        .about("Track student income, expenses and monthly budget")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add").about("Add a transaction"), true))
                .subcommand(
                    tx_fields(Command::new("edit").about("Replace a transaction's fields"), false)
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(month_arg(false))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match note or category label"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Write the transaction list to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage custom categories")
                .subcommand(
                    Command::new("add")
                        .about("Add or replace a category")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("icon").long("icon").required(true))
                        .arg(Arg::new("label").long("label").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["expense", "income"]),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List built-in and custom categories"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a custom category")
                        .arg(Arg::new("key").long("key").required(true)),
                ),
        )
        .subcommand(
            Command::new("balance")
                .about("Show or override the balance")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set").arg(Arg::new("amount").long("amount").required(true))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly budget (0 clears it)")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Budget usage for a month")
                        .arg(month_arg(false)),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived analytics")
                .subcommand(json_flags(
                    Command::new("summary").about("Dashboard figures for today"),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expense totals per category")
                        .arg(month_arg(false)),
                ))
                .subcommand(json_flags(
                    Command::new("calendar")
                        .about("Expense totals per day of month")
                        .arg(month_arg(false)),
                ))
                .subcommand(json_flags(
                    Command::new("average")
                        .about("Average daily spending")
                        .arg(month_arg(false)),
                ))
                .subcommand(Command::new("streak").about("Days in a row under the daily target")),
        )
        .subcommand(json_flags(
            Command::new("insights").about("Smart insights for this month"),
        ))
        .subcommand(
            Command::new("backup")
                .about("Full-state JSON backup")
                .subcommand(
                    Command::new("export")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("import")
                        .about("Replace ALL data with the backup's contents")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Student profile")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("college").long("college"))
                        .arg(Arg::new("course").long("course")),
                )
                .subcommand(
                    Command::new("image").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("App settings")
                .subcommand(
                    Command::new("currency")
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                )
                .subcommand(
                    Command::new("pin")
                        .about("Set a 4-digit PIN, or clear it")
                        .arg(Arg::new("pin").long("pin"))
                        .arg(
                            Arg::new("clear")
                                .long("clear")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("pin"),
                        ),
                )
                .subcommand(
                    Command::new("unlock")
                        .about("Check a PIN")
                        .arg(Arg::new("pin").long("pin").required(true)),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Erase every transaction, category and setting")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the factory reset"),
                ),
        )
}
