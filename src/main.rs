// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Adopta CLI entrypoint.
//!
//! Without a subcommand this runs the interactive TUI. The other subcommands are one-shot views
//! over the same catalog and favorites, plus `serve-demo` to run the built-in catalog service.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use adopta::adoption::AdoptionRequest;
use adopta::client::HttpCatalogClient;
use adopta::config::{CatalogSource, Config, GlobalArgs};
use adopta::context::{BrowsingContext, DetailState};
use adopta::demo::{self, DemoServer};
use adopta::model::{CatalogEntry, EntryId};
use adopta::{logging, tui};
use clap::{Parser, Subcommand};

const DEFAULT_DEMO_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(name = "adopta", version, about = "Browse adoptable dogs and keep a list of favorites")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Interactive catalog browser (default).
    Browse,
    /// Print the catalog, optionally filtered.
    List {
        /// Case-insensitive substring of the city.
        #[arg(long, value_name = "TEXT")]
        city: Option<String>,
        #[arg(long)]
        favorites_only: bool,
    },
    /// Print one dog.
    Show { id: EntryId },
    /// Add or remove a dog from favorites.
    Toggle { id: EntryId },
    /// Print the favorite dogs.
    Favorites,
    /// Fill in the adoption form for a dog.
    Adopt {
        id: EntryId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Serve the built-in demo catalog until interrupted.
    ServeDemo {
        #[arg(long, default_value_t = DEFAULT_DEMO_PORT)]
        port: u16,
    },
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();
        let command = cli.command.unwrap_or(Command::Browse);
        let config = Config::resolve(&cli.global)?;

        if command == Command::Browse {
            logging::init_file(&config.log_path(), "info")?;
        } else {
            logging::init_stderr("info")?;
        }

        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        runtime.block_on(run_command(command, config))
    })();

    if let Err(err) = result {
        eprintln!("adopta: {err}");
        std::process::exit(1);
    }
}

async fn run_command(command: Command, config: Config) -> Result<(), Box<dyn Error>> {
    if let Command::ServeDemo { port } = command {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        println!(
            "Serving demo catalog at http://{}{}",
            listener.local_addr()?,
            demo::COLLECTION_PATH
        );
        demo::serve(listener, demo::demo_catalog(), async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
        return Ok(());
    }

    let demo_server = match config.catalog {
        CatalogSource::Demo => Some(
            DemoServer::spawn(SocketAddr::from(([127, 0, 0, 1], 0)), demo::demo_catalog()).await?,
        ),
        CatalogSource::Remote(_) => None,
    };
    let url = match (&config.catalog, &demo_server) {
        (CatalogSource::Remote(url), _) => url.clone(),
        (CatalogSource::Demo, Some(server)) => server.collection_url(),
        (CatalogSource::Demo, None) => return Err("demo server did not start".into()),
    };
    let client = HttpCatalogClient::new(url)?;
    let storage = Arc::new(config.open_storage());
    tracing::debug!(storage = %config.storage_dir.display(), "favorites storage opened");

    let result = match command {
        Command::Browse => {
            let watcher = storage.spawn_watcher(config.poll_interval);
            let context = BrowsingContext::open(storage.clone());
            let runtime = tokio::runtime::Handle::current();
            let client = Arc::new(client);
            let joined = tokio::task::spawn_blocking(move || {
                tui::run(context, client, runtime).map_err(|err| err.to_string())
            })
            .await;
            watcher.stop();
            match joined {
                Ok(Ok(())) => Ok(()),
                Ok(Err(message)) => Err(message.into()),
                Err(err) => Err(Box::new(err) as Box<dyn Error>),
            }
        }
        Command::List {
            city,
            favorites_only,
        } => {
            let mut context = BrowsingContext::open(storage.clone());
            context.load_catalog(&client).await;
            if let Some(banner) = context.status().banner() {
                return Err(banner.to_owned().into());
            }
            context.set_city_text(city.unwrap_or_default());
            context.set_favorites_only(favorites_only);
            for entry in context.filtered() {
                println!("{}", entry_row(entry, context.is_favorite(entry.id())));
            }
            let counts = context.counts();
            println!(
                "Total: {} | Shown: {} | Favorites: {}",
                counts.total, counts.filtered, counts.favorites
            );
            Ok(())
        }
        Command::Show { id } => {
            let mut context = BrowsingContext::open(storage.clone());
            context.load_detail(&client, id).await;
            match context.detail() {
                DetailState::Loaded(entry) => {
                    for line in entry_details(entry, context.is_favorite(id)) {
                        println!("{line}");
                    }
                    Ok(())
                }
                _ => Err(format!("dog {id} not found").into()),
            }
        }
        Command::Toggle { id } => {
            let mut context = BrowsingContext::open(storage.clone());
            if context.toggle_favorite(id)? {
                println!("Added {id} to favorites");
            } else {
                println!("Removed {id} from favorites");
            }
            Ok(())
        }
        Command::Favorites => {
            let mut context = BrowsingContext::open(storage.clone());
            if context.favorites().is_empty() {
                println!("No favorites yet.");
                return Ok(());
            }
            context.load_catalog(&client).await;
            if context.status().banner().is_some() {
                tracing::warn!("catalog unavailable; listing favorite ids only");
            }
            for id in context.favorites().iter() {
                match context.entry(id) {
                    Some(entry) => println!("{}", entry_row(entry, true)),
                    None => println!("♥ {:>4}  (not in catalog)", id.get()),
                }
            }
            Ok(())
        }
        Command::Adopt {
            id,
            name,
            email,
            phone,
            message,
        } => {
            let mut request = AdoptionRequest::new(name, email, phone);
            if let Some(message) = message {
                request = request.with_message(message);
            }
            request.validate()?;

            let mut context = BrowsingContext::open(storage.clone());
            context.load_detail(&client, id).await;
            match context.detail() {
                DetailState::Loaded(entry) => {
                    println!("{}", request.submit(entry)?);
                    Ok(())
                }
                _ => Err(format!("dog {id} not found").into()),
            }
        }
        Command::ServeDemo { .. } => Ok(()),
    };

    if let Some(server) = demo_server {
        server.shutdown().await?;
    }
    result
}

fn entry_row(entry: &CatalogEntry, favorite: bool) -> String {
    let marker = if favorite { "♥" } else { "♡" };
    let mut row = format!("{marker} {:>4}  {}  {}", entry.id().get(), entry.name(), entry.city());
    if !entry.size().is_empty() {
        row.push_str(&format!(" • {}", entry.size()));
    }
    row
}

fn entry_details(entry: &CatalogEntry, favorite: bool) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", entry.name(), entry.id())];
    if !entry.description().is_empty() {
        lines.push(entry.description().to_owned());
    }
    lines.push(format!("City: {}", entry.city()));
    if !entry.size().is_empty() {
        lines.push(format!("Size: {}", entry.size()));
    }
    lines.push(format!("Age: {} years", entry.age()));
    let tags = entry.tags();
    if !tags.is_empty() {
        lines.push(format!("Tags: {}", tags.join(", ")));
    }
    if !entry.image().is_empty() {
        lines.push(format!("Photo: {}", entry.image()));
    }
    lines.push(if favorite { "♥ favorite" } else { "♡ not a favorite" }.to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{entry_details, entry_row, Cli, Command};
    use adopta::model::{CatalogEntry, EntryId};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["adopta"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.global.demo);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "adopta",
            "list",
            "--city",
            "bog",
            "--favorites-only",
            "--demo",
            "--storage-dir",
            "/tmp/adopta",
            "--poll-ms",
            "100",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::List {
                city: Some("bog".to_owned()),
                favorites_only: true,
            })
        );
        assert!(cli.global.demo);
        assert_eq!(cli.global.storage_dir, Some(PathBuf::from("/tmp/adopta")));
        assert_eq!(cli.global.poll_ms, Some(100));
    }

    #[test]
    fn parses_adopt_form() {
        let cli = Cli::try_parse_from([
            "adopta",
            "adopt",
            "4",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--phone",
            "3001234567",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::Adopt {
                id: EntryId::new(4),
                name: "Ana".to_owned(),
                email: "ana@example.com".to_owned(),
                phone: "3001234567".to_owned(),
                message: None,
            })
        );
    }

    #[test]
    fn serve_demo_defaults_port() {
        let cli = Cli::try_parse_from(["adopta", "serve-demo"]).unwrap();
        assert_eq!(cli.command, Some(Command::ServeDemo { port: 8080 }));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["adopta", "toggle", "abc"]).is_err());
        assert!(Cli::try_parse_from(["adopta", "show"]).is_err());
    }

    #[test]
    fn adopt_requires_contact_fields() {
        assert!(Cli::try_parse_from(["adopta", "adopt", "4", "--name", "Ana"]).is_err());
    }

    #[test]
    fn rows_mark_favorites() {
        let entry = CatalogEntry::new(EntryId::new(7), "Kira", "Medellín").with_size("Mediano");
        assert_eq!(entry_row(&entry, true), "♥    7  Kira  Medellín • Mediano");
        assert_eq!(
            entry_row(&CatalogEntry::new(EntryId::new(12), "Max", "Cali"), false),
            "♡   12  Max  Cali"
        );
    }

    #[test]
    fn details_list_known_fields() {
        let entry = CatalogEntry::new(EntryId::new(3), "Canela", "Cali").with_age(1);
        assert_eq!(
            entry_details(&entry, false),
            vec![
                "Canela (3)".to_owned(),
                "City: Cali".to_owned(),
                "Age: 1 years".to_owned(),
                "♡ not a favorite".to_owned(),
            ]
        );
    }
}
