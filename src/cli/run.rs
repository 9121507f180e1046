use clap::Parser;
use dotenv::dotenv;

use crate::cli::command::{Cli, Commands, SortKey};
use crate::cli::{EMPTY_LIST, display_contact, display_counts, render_list};
use crate::config::Config;
use crate::domain::{Contact, ContactDraft, ContactId, ContactStore};
use crate::errors::AppError;
use crate::photo::encode_photo;
use crate::storage::storage_port::{export_contacts_to_csv, import_contacts_from_csv};

pub fn run_app() -> Result<(), AppError> {
    // .env has to be read before clap resolves `env` defaults.
    dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_values(Some(cli.storage_choice), cli.storage_path, cli.storage_key)?;
    let mut store = ContactStore::from_config(&config);

    match cli.command {
        Commands::Add {
            name,
            phone,
            email,
            address,
            group,
            notes,
            favorite,
            emergency,
            photo,
        } => {
            // Encode first: the payload is just another field by the time we add.
            let photo = photo.map(encode_photo).transpose()?;

            let draft = ContactDraft {
                name,
                phone,
                email,
                address,
                group,
                notes,
                favorite,
                emergency,
                photo,
            };

            let contact = store.add(draft)?;

            println!("Contact added successfully");
            println!("{}", display_contact(&contact));
            Ok(())
        }

        Commands::List {
            favorites,
            emergency,
            group,
            sort,
            reverse,
        } => {
            let mut contacts: Vec<&Contact> = store
                .list()
                .iter()
                .filter(|c| !favorites || c.favorite)
                .filter(|c| !emergency || c.emergency)
                .filter(|c| match &group {
                    Some(group) => c
                        .group
                        .as_ref()
                        .is_some_and(|g| g.eq_ignore_ascii_case(group)),
                    None => true,
                })
                .collect();

            if let Some(key) = sort {
                match key {
                    SortKey::Name => {
                        contacts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                    }
                    SortKey::Phone => contacts.sort_by(|a, b| a.phone.cmp(&b.phone)),
                }
            }

            if reverse {
                contacts.reverse();
            }

            println!("{}", render_list(contacts));
            Ok(())
        }

        Commands::Edit {
            id,
            name,
            phone,
            email,
            address,
            group,
            notes,
            favorite,
            emergency,
            photo,
            clear_photo,
        } => {
            let photo = photo.map(encode_photo).transpose()?;

            let mut draft = store.begin_edit(ContactId(id))?;

            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(phone) = phone {
                draft.phone = phone;
            }
            if let Some(email) = email {
                draft.email = Some(email);
            }
            if let Some(address) = address {
                draft.address = Some(address);
            }
            if let Some(group) = group {
                draft.group = Some(group);
            }
            if let Some(notes) = notes {
                draft.notes = Some(notes);
            }
            if let Some(favorite) = favorite {
                draft.favorite = favorite;
            }
            if let Some(emergency) = emergency {
                draft.emergency = emergency;
            }
            if clear_photo {
                draft.photo = None;
            } else if photo.is_some() {
                draft.photo = photo;
            }

            let contact = store.commit_edit(draft)?;

            println!("Contact updated successfully");
            println!("{}", display_contact(&contact));
            Ok(())
        }

        Commands::Delete { id } => {
            if store.delete(ContactId(id))? {
                println!("Contact removed");
            } else {
                println!("No contact with id {id}");
            }
            Ok(())
        }

        Commands::Favorite { id } => {
            let id = ContactId(id);
            let favorite = store.toggle_favorite(id)?;
            let name = store.get(id).map(|c| c.name.as_str()).unwrap_or_default();

            if favorite {
                println!("{name} added to favorites");
            } else {
                println!("{name} removed from favorites");
            }
            Ok(())
        }

        Commands::Emergency { id } => {
            let id = ContactId(id);
            let emergency = store.toggle_emergency(id)?;
            let name = store.get(id).map(|c| c.name.as_str()).unwrap_or_default();

            if emergency {
                println!("{name} added to emergency contacts");
            } else {
                println!("{name} removed from emergency contacts");
            }
            Ok(())
        }

        Commands::Search { query } => {
            println!("{}", render_list(&store.search(&query)));
            Ok(())
        }

        Commands::Stats => {
            println!("{}", display_counts(&store.counts()));

            if store.is_empty() {
                return Ok(());
            }

            let favorites = store.favorites().collect::<Vec<_>>();
            if !favorites.is_empty() {
                println!("\nFavorites:\n{}", render_list(favorites));
            }

            let emergencies = store.emergencies().collect::<Vec<_>>();
            if !emergencies.is_empty() {
                println!("\nEmergency:\n{}", render_list(emergencies));
            }
            Ok(())
        }

        Commands::Import { src } => {
            let report = import_contacts_from_csv(&mut store, src.as_deref())?;

            for (row, reason) in &report.skipped {
                eprintln!("Row {row} skipped: {reason}");
            }

            println!(
                "Successfully imported {} contacts from {:?}.",
                report.imported, report.path
            );
            Ok(())
        }

        Commands::Export { des } => {
            if store.is_empty() {
                println!("{EMPTY_LIST}");
                return Ok(());
            }

            let (path, total) = export_contacts_to_csv(store.list(), des.as_deref())?;

            println!("Successfully exported {} contacts to {:?}.", total, path);
            Ok(())
        }
    }
}
