// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner Control CLI
//!
//! CLI tool for managing Spanner instances and databases.
//!
//! Usage:
//!   spanner-ctl <command> [options]
//!
//! Commands:
//!   instances                     List instances
//!   instance <id>                 Show an instance
//!   create-instance <id> --config <id> --nodes <n> [--name <name>] [--label k=v]... [--wait]
//!   update-instance <id> [--name <name>] [--nodes <n>] [--wait]
//!   delete-instance <id>
//!   configs                       List instance configs
//!   config <id>                   Show an instance config
//!   databases <instance>          List databases
//!   create-database <instance> <db> [--ddl <stmt>]... [--wait]
//!   drop-database <instance> <db>
//!   ddl <instance> <db>           Print the database schema
//!   policy <instance>             Print the instance IAM policy
//!   test-permissions <instance> <perm>...
//!   operation <name>              Show a long-running operation

use std::collections::HashMap;
use std::io;
use std::process::ExitCode;

use serde::Serialize;
use spanner_sdk::{CreateInstanceOptions, Job, SdkConfig, Spanner};

fn print_usage() {
    eprintln!(
        r#"Usage: spanner-ctl <command> [options]

Manage Cloud Spanner instances and databases.

COMMANDS:
    instances                           List instances
    instance <id>                       Show an instance
    create-instance <id>                Create an instance
    update-instance <id>                Update an instance's name or node count
    delete-instance <id>                Delete an instance
    configs                             List instance configs
    config <id>                         Show an instance config
    databases <instance>                List databases of an instance
    create-database <instance> <db>     Create a database
    drop-database <instance> <db>       Drop a database
    ddl <instance> <db>                 Print a database's DDL statements
    policy <instance>                   Print an instance's IAM policy
    test-permissions <instance> <perm>...
                                        Print which permissions the caller holds
    operation <name>                    Show a long-running operation

LIST OPTIONS:
    --max <n>                           Page size
    --limit <n>                         Max additional pages to fetch

CREATE-INSTANCE OPTIONS:
    --config <id>                       Instance config id or path (required)
    --nodes <n>                         Node count (required)
    --name <name>                       Display name (default: the instance id)
    --label <key=value>                 Label, repeatable
    --wait                              Wait for the operation to finish

UPDATE-INSTANCE OPTIONS:
    --name <name>                       New display name
    --nodes <n>                         New node count
    --wait                              Wait for the operation to finish

CREATE-DATABASE OPTIONS:
    --ddl <statement>                   DDL statement to apply, repeatable
    --wait                              Wait for the operation to finish

ENVIRONMENT:
    SPANNER_PROJECT                     Project id (or GOOGLE_CLOUD_PROJECT)
    SPANNER_EMULATOR_HOST               Emulator host:port
    SPANNER_KEYFILE                     Service account key (or GOOGLE_APPLICATION_CREDENTIALS)
    SPANNER_ACCESS_TOKEN                OAuth access token
    CLOUDSDK_CONFIG                     gcloud config dir holding application default credentials
    RUST_LOG                            Log filter (default: warn)

EXAMPLES:
    # Create an instance and wait until it is ready
    spanner-ctl create-instance orders-prod --config regional-us-central1 --nodes 1 --wait

    # Create a database with a table
    spanner-ctl create-database orders-prod orders \
        --ddl 'CREATE TABLE users (id INT64 NOT NULL) PRIMARY KEY (id)' --wait
"#
    );
}

#[derive(Debug, Default, PartialEq)]
struct ListArgs {
    max: Option<u32>,
    request_limit: Option<u32>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Instances(ListArgs),
    Instance {
        instance_id: String,
    },
    CreateInstance {
        instance_id: String,
        name: Option<String>,
        config: String,
        nodes: i32,
        labels: HashMap<String, String>,
        wait: bool,
    },
    UpdateInstance {
        instance_id: String,
        name: Option<String>,
        nodes: Option<i32>,
        wait: bool,
    },
    DeleteInstance {
        instance_id: String,
    },
    Configs(ListArgs),
    Config {
        config_id: String,
    },
    Databases {
        instance_id: String,
        list: ListArgs,
    },
    CreateDatabase {
        instance_id: String,
        database_id: String,
        statements: Vec<String>,
        wait: bool,
    },
    DropDatabase {
        instance_id: String,
        database_id: String,
    },
    Ddl {
        instance_id: String,
        database_id: String,
    },
    Policy {
        instance_id: String,
    },
    TestPermissions {
        instance_id: String,
        permissions: Vec<String>,
    },
    Operation {
        name: String,
    },
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from_vec(&args)
}

fn parse_list_args(args: &[String]) -> Result<ListArgs, String> {
    let mut list = ListArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--max" => {
                i += 1;
                list.max = Some(
                    args.get(i)
                        .ok_or("--max requires a number")?
                        .parse()
                        .map_err(|_| "Invalid page size")?,
                );
            }
            "--limit" => {
                i += 1;
                list.request_limit = Some(
                    args.get(i)
                        .ok_or("--limit requires a number")?
                        .parse()
                        .map_err(|_| "Invalid request limit")?,
                );
            }
            arg => return Err(format!("Unknown argument: {}", arg)),
        }
        i += 1;
    }
    Ok(list)
}

fn parse_label(value: &str) -> Result<(String, String), String> {
    let (key, value) = value
        .split_once('=')
        .ok_or_else(|| format!("Invalid label {:?}, expected key=value", value))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_args_from_vec(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            std::process::exit(0);
        }
        "instances" => Ok(Command::Instances(parse_list_args(&args[2..])?)),
        "instance" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            Ok(Command::Instance { instance_id })
        }
        "create-instance" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let mut name: Option<String> = None;
            let mut config: Option<String> = None;
            let mut nodes: Option<i32> = None;
            let mut labels = HashMap::new();
            let mut wait = false;

            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--name" => {
                        i += 1;
                        name = Some(args.get(i).ok_or("--name requires a value")?.clone());
                    }
                    "--config" => {
                        i += 1;
                        config = Some(args.get(i).ok_or("--config requires an ID")?.clone());
                    }
                    "--nodes" => {
                        i += 1;
                        nodes = Some(
                            args.get(i)
                                .ok_or("--nodes requires a number")?
                                .parse()
                                .map_err(|_| "Invalid node count")?,
                        );
                    }
                    "--label" => {
                        i += 1;
                        let (key, value) =
                            parse_label(args.get(i).ok_or("--label requires key=value")?)?;
                        labels.insert(key, value);
                    }
                    "--wait" => wait = true,
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::CreateInstance {
                instance_id,
                name,
                config: config.ok_or("--config is required")?,
                nodes: nodes.ok_or("--nodes is required")?,
                labels,
                wait,
            })
        }
        "update-instance" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let mut name: Option<String> = None;
            let mut nodes: Option<i32> = None;
            let mut wait = false;

            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--name" => {
                        i += 1;
                        name = Some(args.get(i).ok_or("--name requires a value")?.clone());
                    }
                    "--nodes" => {
                        i += 1;
                        nodes = Some(
                            args.get(i)
                                .ok_or("--nodes requires a number")?
                                .parse()
                                .map_err(|_| "Invalid node count")?,
                        );
                    }
                    "--wait" => wait = true,
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            if name.is_none() && nodes.is_none() {
                return Err("Nothing to update, pass --name or --nodes".to_string());
            }

            Ok(Command::UpdateInstance {
                instance_id,
                name,
                nodes,
                wait,
            })
        }
        "delete-instance" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            Ok(Command::DeleteInstance { instance_id })
        }
        "configs" => Ok(Command::Configs(parse_list_args(&args[2..])?)),
        "config" => {
            let config_id = args.get(2).ok_or("Instance config ID required")?.clone();
            Ok(Command::Config { config_id })
        }
        "databases" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let list = parse_list_args(&args[3.min(args.len())..])?;
            Ok(Command::Databases { instance_id, list })
        }
        "create-database" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let database_id = args.get(3).ok_or("Database ID required")?.clone();
            let mut statements = Vec::new();
            let mut wait = false;

            let mut i = 4;
            while i < args.len() {
                match args[i].as_str() {
                    "--ddl" => {
                        i += 1;
                        statements.push(args.get(i).ok_or("--ddl requires a statement")?.clone());
                    }
                    "--wait" => wait = true,
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::CreateDatabase {
                instance_id,
                database_id,
                statements,
                wait,
            })
        }
        "drop-database" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let database_id = args.get(3).ok_or("Database ID required")?.clone();
            Ok(Command::DropDatabase {
                instance_id,
                database_id,
            })
        }
        "ddl" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let database_id = args.get(3).ok_or("Database ID required")?.clone();
            Ok(Command::Ddl {
                instance_id,
                database_id,
            })
        }
        "policy" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            Ok(Command::Policy { instance_id })
        }
        "test-permissions" => {
            let instance_id = args.get(2).ok_or("Instance ID required")?.clone();
            let permissions: Vec<String> = args.iter().skip(3).cloned().collect();
            if permissions.is_empty() {
                return Err("At least one permission required".to_string());
            }
            Ok(Command::TestPermissions {
                instance_id,
                permissions,
            })
        }
        "operation" => {
            let name = args.get(2).ok_or("Operation name required")?.clone();
            Ok(Command::Operation { name })
        }
        cmd => Err(format!("Unknown command: {}", cmd)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Default to warn if RUST_LOG is not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cmd = match parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let config = match SdkConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let spanner = match Spanner::connect(config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect to Spanner: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute_command(&spanner, cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|e| e.to_string())?
    );
    Ok(())
}

/// Print the job, optionally after waiting for it, and fail if it failed.
async fn finish_job<T>(mut job: Job<T>, wait: bool) -> Result<(), String>
where
    T: spanner_sdk::FromOperation + Serialize,
{
    if !wait {
        return print_json(&job);
    }
    job.wait_until_done().await.map_err(|e| e.to_string())?;
    match job.result().map_err(|e| e.to_string())? {
        Some(value) => print_json(&value),
        None => print_json(&job),
    }
}

async fn execute_command(spanner: &Spanner, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Instances(list) => {
            let instances = spanner
                .instances(None, list.max)
                .await
                .map_err(|e| e.to_string())?
                .all(list.request_limit)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&instances)?;
        }

        Command::Instance { instance_id } => {
            match spanner
                .instance(&instance_id)
                .await
                .map_err(|e| e.to_string())?
            {
                Some(instance) => print_json(&instance)?,
                None => return Err(format!("Instance not found: {}", instance_id)),
            }
        }

        Command::CreateInstance {
            instance_id,
            name,
            config,
            nodes,
            labels,
            wait,
        } => {
            let mut options = CreateInstanceOptions::new(config, nodes).with_labels(labels);
            if let Some(name) = name {
                options = options.with_name(name);
            }
            let job = spanner
                .create_instance(&instance_id, options)
                .await
                .map_err(|e| e.to_string())?;
            finish_job(job, wait).await?;
        }

        Command::UpdateInstance {
            instance_id,
            name,
            nodes,
            wait,
        } => {
            let mut instance = spanner
                .instance(&instance_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Instance not found: {}", instance_id))?;
            if let Some(name) = name {
                instance.set_name(name);
            }
            if let Some(nodes) = nodes {
                instance.set_nodes(nodes);
            }
            let job = instance.save().await.map_err(|e| e.to_string())?;
            finish_job(job, wait).await?;
        }

        Command::DeleteInstance { instance_id } => {
            let instance = spanner
                .instance(&instance_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Instance not found: {}", instance_id))?;
            instance.delete().await.map_err(|e| e.to_string())?;
            println!("Deleted: {}", instance_id);
        }

        Command::Configs(list) => {
            let configs = spanner
                .instance_configs(None, list.max)
                .await
                .map_err(|e| e.to_string())?
                .all(list.request_limit)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&configs)?;
        }

        Command::Config { config_id } => {
            match spanner
                .instance_config(&config_id)
                .await
                .map_err(|e| e.to_string())?
            {
                Some(config) => print_json(&config)?,
                None => return Err(format!("Instance config not found: {}", config_id)),
            }
        }

        Command::Databases { instance_id, list } => {
            let databases = spanner
                .databases(&instance_id, None, list.max)
                .await
                .map_err(|e| e.to_string())?
                .all(list.request_limit)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&databases)?;
        }

        Command::CreateDatabase {
            instance_id,
            database_id,
            statements,
            wait,
        } => {
            let job = spanner
                .create_database(&instance_id, &database_id, statements)
                .await
                .map_err(|e| e.to_string())?;
            finish_job(job, wait).await?;
        }

        Command::DropDatabase {
            instance_id,
            database_id,
        } => {
            let database = spanner
                .database(&instance_id, &database_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Database not found: {}", database_id))?;
            database.drop().await.map_err(|e| e.to_string())?;
            println!("Dropped: {}", database_id);
        }

        Command::Ddl {
            instance_id,
            database_id,
        } => {
            let mut database = spanner
                .database(&instance_id, &database_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Database not found: {}", database_id))?;
            for statement in database.ddl(false).await.map_err(|e| e.to_string())? {
                println!("{};", statement);
            }
        }

        Command::Policy { instance_id } => {
            let mut instance = spanner
                .instance(&instance_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Instance not found: {}", instance_id))?;
            let policy = instance.policy(false).await.map_err(|e| e.to_string())?;
            print_json(policy)?;
        }

        Command::TestPermissions {
            instance_id,
            permissions,
        } => {
            let instance = spanner
                .instance(&instance_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Instance not found: {}", instance_id))?;
            let permitted = instance
                .test_permissions(permissions)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&permitted)?;
        }

        Command::Operation { name } => {
            let job: Job<()> = spanner.job(&name).await.map_err(|e| e.to_string())?;
            print_json(&job)?;
        }
    }

    Ok(())
}
