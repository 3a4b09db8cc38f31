use std::path::{Path, PathBuf};
use anyhow::Context as _;
use emojikit::clipboard::{default_clipboard, Clipboard};
use emojikit::config::{self, EmojikitConfig};
use emojikit::import;
use emojikit::output::{emit_success, is_quiet, OutputMode};
use emojikit::ui::{self, Icons};
use emojikit::{Emoji, EmojiStore, MutationEngine, QueryEngine, SearchFilter};
use owo_colors::OwoColorize;

pub struct Context {
    pub output: OutputMode,
    pub database: Option<PathBuf>,
    pub config: Option<EmojikitConfig>,
    pub config_path: Option<PathBuf>,
}

impl Context {
    fn database_path(&self) -> anyhow::Result<PathBuf> {
        config::resolve_database_path(self.database.as_deref(), self.config.as_ref())
    }

    /// Provision (if needed) and open the configured store
    fn open_store(&self) -> anyhow::Result<EmojiStore> {
        let path = self.database_path()?;
        let default_store = config::resolve_default_store(self.config.as_ref());
        let store = EmojiStore::open(&path, default_store.as_deref())
            .with_context(|| format!("run `emojikit import <dataset>` to create {}", path.display()))?;
        Ok(store)
    }
}

pub fn run_search(
    ctx: &Context,
    query: Option<String>,
    category: Option<String>,
    limit: usize,
    offset: usize,
) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let filter = SearchFilter { text: query, category, limit, offset };
    let results = QueryEngine::new(&store).search(&filter);

    if ctx.output.is_human() {
        let mut title = String::from("Search");
        if let Some(text) = &filter.text {
            title.push_str(&format!(" '{}'", text));
        }
        if let Some(category) = &filter.category {
            title.push_str(&format!(" in {}", category));
        }
        ui::header(Icons::SEARCH, &title);
    }
    print_emojis(ctx.output, "search", &results)
}

pub fn run_categories(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let categories = QueryEngine::new(&store).list_categories();
    print_names(ctx.output, "categories", "Categories", &categories)
}

pub fn run_subgroups(ctx: &Context, category: &str) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let subgroups = QueryEngine::new(&store).list_subgroups(category);
    print_names(ctx.output, "subgroups", &format!("Subgroups of {}", category), &subgroups)
}

pub fn run_favorites(ctx: &Context, limit: usize, offset: usize) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let favorites = QueryEngine::new(&store).list_favorites(limit, offset);
    if ctx.output.is_human() {
        ui::header(Icons::STAR, "Favorites");
    }
    print_emojis(ctx.output, "favorites", &favorites)
}

pub fn run_recent(ctx: &Context, limit: usize) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let recent = QueryEngine::new(&store).list_recent(limit);
    if ctx.output.is_human() {
        ui::header(Icons::CLOCK, "Recently used");
    }
    print_emojis(ctx.output, "recent", &recent)
}

pub fn run_info(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let emoji = QueryEngine::new(&store).get_by_id(id);

    if !ctx.output.is_human() {
        return emit_success("info", &emoji);
    }

    match emoji {
        Some(emoji) => {
            ui::section(&format!("Emoji {}", id));
            ui::info("Unicode", &emoji.unicode);
            ui::info("Name", &emoji.short_name);
            ui::info("Group", emoji.group_label());
            ui::info("Subgroup", emoji.subgroup.as_deref().unwrap_or(""));
            ui::info("Keywords", &emoji.keywords.join(", "));
            let favorite = if emoji.is_favorite { "yes" } else { "no" };
            ui::info("Favorite", &format!("{} {}", favorite, ui::favorite_marker(emoji.is_favorite)));
        }
        None => ui::warn(&format!("No emoji with id {}", id)),
    }
    Ok(())
}

pub fn run_favorite(ctx: &Context, id: i64, favorite: bool) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let mutations = MutationEngine::new(&store);
    if favorite {
        mutations.add_favorite(id)?;
    } else {
        mutations.remove_favorite(id)?;
    }
    report_favorite(ctx.output, id, favorite)
}

pub fn run_toggle(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let favorite = MutationEngine::new(&store).toggle_favorite(id)?;
    report_favorite(ctx.output, id, favorite)
}

pub fn run_use(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let emoji = QueryEngine::new(&store)
        .get_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("No emoji with id {}", id))?;

    MutationEngine::new(&store).record_usage(id)?;
    let copied = default_clipboard().copy_text(&emoji.unicode);

    if ctx.output.is_human() {
        if copied {
            ui::success(&format!("Copied {} {}", emoji.unicode, emoji.short_name));
        } else {
            ui::warn(&format!("Recorded use of {}, but the clipboard is unavailable", emoji.unicode));
        }
        Ok(())
    } else {
        emit_success("use", serde_json::json!({ "emoji": emoji, "copied": copied }))
    }
}

pub fn run_copy(ctx: &Context, text: &str) -> anyhow::Result<()> {
    if !default_clipboard().copy_text(text) {
        anyhow::bail!("Failed to copy to the clipboard");
    }
    if ctx.output.is_human() {
        ui::success(&format!("{} Copied {}", Icons::CLIPBOARD, text));
        Ok(())
    } else {
        emit_success("copy", serde_json::json!({ "copied": true }))
    }
}

pub fn run_paste(ctx: &Context) -> anyhow::Result<()> {
    let text = default_clipboard().read_text();
    if !ctx.output.is_human() {
        return emit_success("paste", serde_json::json!({ "text": text }));
    }
    match text {
        Some(text) => println!("{}", text),
        None => ui::warn("Clipboard is empty or unavailable"),
    }
    Ok(())
}

pub fn run_import(ctx: &Context, dataset_path: &Path) -> anyhow::Result<()> {
    let db_path = ctx.database_path()?;
    config::ensure_db_dir(&db_path)?;

    let dataset = import::load_dataset(dataset_path)
        .with_context(|| format!("failed to read dataset {}", dataset_path.display()))?;

    if ctx.output.is_human() {
        ui::header(Icons::PACKAGE, &format!("Importing {} emojis", dataset.len()));
        ui::info("Dataset", &dataset_path.display().to_string());
        ui::info("Database", &db_path.display().to_string());
    }

    let spinner = ui::Spinner::new("Writing catalog");
    let store = EmojiStore::at(&db_path);
    let result = store.with_conn(|conn| import::import_dataset(conn, &dataset));
    spinner.finish_and_clear();
    let stats = result?;
    store.close()?;

    if ctx.output.is_human() {
        ui::success(&format!("Imported {}", stats));
        Ok(())
    } else {
        emit_success("import", stats)
    }
}

pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let stats = store.stats()?;

    if !ctx.output.is_human() {
        return emit_success("stats", stats);
    }

    let path = store.path().map(|p| p.display().to_string()).unwrap_or_default();
    ui::header(Icons::STATS, "Emojikit Statistics");
    ui::info("Database", &path);
    let (emojis, keywords) = (stats.emojis.to_string(), stats.keywords.to_string());
    let (favorites, history) = (stats.favorites.to_string(), stats.history.to_string());
    println!(
        "{}",
        ui::stats_table(&[
            ("Emojis", &emojis),
            ("Keywords", &keywords),
            ("Favorites", &favorites),
            ("History", &history),
        ])
    );
    Ok(())
}

pub fn run_init(ctx: &Context, force: bool) -> anyhow::Result<()> {
    let path = ctx.config_path.clone().unwrap_or_else(config::default_config_path);
    let database = ctx.database_path()?;
    let default_store = config::resolve_default_store(ctx.config.as_ref());
    let cfg = EmojikitConfig {
        database: Some(database.display().to_string()),
        default_store: default_store.map(|p| p.display().to_string()),
    };
    config::write_config(&path, &cfg, force)?;

    if ctx.output.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
        ui::summary_row("database", &database.display().to_string());
        Ok(())
    } else {
        emit_success("init", cfg)
    }
}

fn report_favorite(output: OutputMode, id: i64, favorite: bool) -> anyhow::Result<()> {
    if output.is_human() {
        if favorite {
            ui::success(&format!("{} Emoji {} added to favorites", ui::favorite_marker(true), id));
        } else {
            ui::success(&format!("Emoji {} removed from favorites", id));
        }
        Ok(())
    } else {
        emit_success("favorite", serde_json::json!({ "id": id, "favorite": favorite }))
    }
}

fn print_emojis(output: OutputMode, command: &str, emojis: &[Emoji]) -> anyhow::Result<()> {
    if !output.is_human() {
        return emit_success(command, emojis);
    }

    if emojis.is_empty() {
        println!("{} {}", Icons::EMPTY, ui::dim("No emojis found."));
        return Ok(());
    }

    println!("{}", ui::emoji_table(emojis));
    if !is_quiet() {
        println!("{}", ui::dim(&format!("Total: {}", emojis.len())));
    }
    Ok(())
}

fn print_names(output: OutputMode, command: &str, title: &str, names: &[String]) -> anyhow::Result<()> {
    if !output.is_human() {
        return emit_success(command, names);
    }

    ui::header(Icons::FOLDER, title);
    if names.is_empty() {
        println!("{} {}", Icons::EMPTY, ui::dim("None."));
    }
    for name in names {
        println!("  - {}", name.style(ui::theme().info.clone()));
    }
    Ok(())
}
