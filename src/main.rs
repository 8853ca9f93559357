use anyhow::Context;
use planwright::{
    init_logging, CatalogRegistry, CreateDesign, DesignEditor, DesignGateway, EditorConfig,
    FileDesignStore, BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "\
Usage: planwright [--config <path>] <command>

Commands:
  demo                 Create a sample kitchen and print its takeoff
  list                 List designs in the store
  revisions <design>   List revisions of a design
  takeoff <design>     Print the takeoff of a design's current revision
  restore <design> <revision>
                       Append a copy of an old revision as the current one
  archive <design>     Archive a design
  catalog              List catalog cabinet specs";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = PathBuf::from(args.remove(i + 1));
            args.remove(i);
            path
        }
        Some(_) => anyhow::bail!("--config needs a path\n\n{}", USAGE),
        None => EditorConfig::default_path(),
    };
    let config = EditorConfig::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    tracing::info!("Planwright {} (built {})", VERSION, BUILD_DATE);

    let catalog = Arc::new(CatalogRegistry::standard());
    let store = Arc::new(
        FileDesignStore::open(&config.storage.directory)
            .await
            .with_context(|| format!("opening store at {}", config.storage.directory.display()))?
            .with_retention(config.autosave.retention),
    );

    let command: Vec<&str> = args.iter().map(String::as_str).collect();
    match command.as_slice() {
        ["demo"] => demo(store, &config, catalog).await,
        ["list"] => {
            for design in store.list_designs().await? {
                println!(
                    "{}  {}  (updated {})",
                    design.id,
                    design.title,
                    design.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(())
        }
        ["revisions", design_id] => {
            for meta in store.list_revisions(design_id).await? {
                println!(
                    "#{:<4} {}  {}{}",
                    meta.index,
                    meta.id,
                    meta.created_at.format("%Y-%m-%d %H:%M:%S"),
                    if meta.autosave { "  (autosave)" } else { "" }
                );
            }
            Ok(())
        }
        ["takeoff", design_id] => {
            let loaded = store.read(design_id).await?;
            println!("{} (revision {})", loaded.design.title, loaded.revision.index);
            print!("{}", planwright::compute_takeoff(&loaded.revision.canvas_data.state));
            Ok(())
        }
        ["restore", design_id, revision_id] => {
            let revision = store.restore_revision(design_id, revision_id).await?;
            println!("Restored as revision {}", revision.index);
            Ok(())
        }
        ["archive", design_id] => {
            let design = store.archive_design(design_id).await?;
            println!("Archived {}", design.title);
            Ok(())
        }
        ["catalog"] => {
            println!("Catalog {}", catalog.version());
            for spec in catalog.iter() {
                println!(
                    "{:<12} {:<6} {}\" x {}\" x {}\"  {}",
                    spec.id, spec.mount, spec.width_in, spec.depth_in, spec.height_in, spec.label
                );
            }
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            Ok(())
        }
    }
}

async fn demo(
    store: Arc<FileDesignStore>,
    config: &EditorConfig,
    catalog: Arc<CatalogRegistry>,
) -> anyhow::Result<()> {
    let mut editor =
        DesignEditor::create(store, config, catalog, CreateDesign::titled("Demo kitchen")).await?;

    editor.edit(|session| -> anyhow::Result<()> {
        let mut x = 0.0;
        for spec_id in ["base-36", "base-30", "base-36"] {
            let id = session.place_catalog_cabinet_at(spec_id, planwright::Point::new(x, 0.0))?;
            x += session
                .state()
                .cabinet(&id)
                .map_or(0.0, |cabinet| cabinet.width);
        }
        session.generate_countertop_from_cabinets();
        Ok(())
    })?;

    let revision = editor.save().await?;
    println!(
        "Saved {} ({}) as revision {}",
        editor.design().title,
        editor.design().id,
        revision.index
    );
    print!("{}", editor.session().takeoff());
    editor.close();
    Ok(())
}
