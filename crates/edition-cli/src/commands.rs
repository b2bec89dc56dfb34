use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use edition_clip::{
    BrandedImage, Branding, Compositor, Delivery, NoShareSurface, ShareExporter, ShareSurface,
    SwashPainter, parse_hex_color, render_cover,
};
use edition_model::{CropRegion, EditionCatalog, PaperLayout};
use edition_viewer::{Message, RegionCrop, Session};
use tracing::{info, info_span, warn};

use edition_cli::config::{BrandingConfig, Config, PathsConfig, ShareConfig};
use edition_cli::driver::Driver;
use edition_cli::surface::CommandShareSurface;

use crate::cli::{CatalogArgs, ClipArgs, CoverArgs, PageArgs};
use crate::summary::{print_controls, print_editions};

pub fn run_editions(config: &Config) -> Result<()> {
    let layout = PaperLayout::new(&config.paths.papers_dir);
    let catalog = load_catalog(&config.paths)?;
    print_editions(&catalog, &layout);
    Ok(())
}

pub fn run_show(config: &Config, args: &PageArgs) -> Result<()> {
    let mut driver = start_session(config, CropRegion::new(0, 0, 0, 0))?;
    if !driver.session().state().is_empty() {
        seek(&mut driver, args)?;
    }
    driver.settle()?;
    print_controls(&driver.session().controls());
    Ok(())
}

pub fn run_clip(config: &Config, args: &ClipArgs) -> Result<()> {
    let mut driver = open_page(config, &args.page, args.region)?;
    let span = info_span!("clip", page = ?driver.session().state().page_target());
    let _guard = span.enter();

    driver.settle()?;
    if let Some(failure) = driver.session().display().failure() {
        bail!("{failure}");
    }
    driver.send(Message::OpenClipper)?;
    let date = driver
        .session()
        .state()
        .selected_date()
        .ok_or_else(|| anyhow!("no edition selected"))?;
    let crop = driver.session().crop_output();
    if crop.is_none() {
        warn!(region = %args.region, "region lies outside the page image");
    }

    let mut compositor = build_compositor(&config.branding)?;
    let clip = compositor
        .compose(crop.as_ref(), date)
        .context("compose clip")?;
    driver.send(Message::CloseClipper)?;

    let command = config.share.command.as_deref().unwrap_or_default();
    let surface = CommandShareSurface::new(command, std::env::temp_dir().join("tom-city-edition"));
    match surface {
        Some(surface) if !args.no_share => deliver(surface, &config.share, &config.paths, &clip),
        _ => deliver(NoShareSurface, &config.share, &config.paths, &clip),
    }
}

pub fn run_cover(config: &Config, args: &CoverArgs) -> Result<()> {
    let page = PageArgs {
        date: args.date,
        page: 1,
    };
    let mut driver = open_page(config, &page, CropRegion::new(0, 0, 0, 0))?;
    driver.settle()?;
    let display = driver.session().display();
    if let Some(failure) = display.failure() {
        bail!("{failure}");
    }
    let loaded = display
        .loaded()
        .ok_or_else(|| anyhow!("page 1 did not load"))?;
    let date = loaded.target.date;

    let preview = render_cover(&loaded.image).context("render cover")?;
    let path = driver.session().layout().preview_image(date);
    fs::write(&path, &preview.jpeg)
        .with_context(|| format!("write cover {}", path.display()))?;
    info!(
        path = %path.display(),
        quality = preview.quality,
        bytes = preview.jpeg.len(),
        "cover written"
    );
    println!(
        "{} ({} KiB, quality {})",
        path.display(),
        preview.jpeg.len() / 1024,
        preview.quality
    );

    if let Some(latest) = &args.latest {
        create_parent(latest)?;
        fs::copy(&path, latest).with_context(|| format!("copy cover to {}", latest.display()))?;
        println!("{}", latest.display());
    }
    Ok(())
}

pub fn run_catalog(config: &Config, args: &CatalogArgs) -> Result<()> {
    let layout = PaperLayout::new(&config.paths.papers_dir);
    let catalog = layout
        .scan()
        .with_context(|| format!("scan {}", layout.root().display()))?;
    match &args.write {
        Some(path) => {
            catalog
                .write_json(path)
                .with_context(|| format!("write catalog {}", path.display()))?;
            info!(path = %path.display(), editions = catalog.len(), "catalog written");
            println!("{} ({} editions)", path.display(), catalog.len());
        }
        None => println!("{}", catalog.to_json_pretty()?),
    }
    Ok(())
}

fn load_catalog(paths: &PathsConfig) -> Result<EditionCatalog> {
    let catalog = match &paths.catalog {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read catalog {}", path.display()))?;
            EditionCatalog::from_json_str(&text)
                .with_context(|| format!("parse catalog {}", path.display()))?
        }
        None => PaperLayout::new(&paths.papers_dir)
            .scan()
            .with_context(|| format!("scan {}", paths.papers_dir.display()))?,
    };
    info!(editions = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn start_session(config: &Config, region: CropRegion) -> Result<Driver<RegionCrop>> {
    let catalog = load_catalog(&config.paths)?;
    let layout = PaperLayout::new(&config.paths.papers_dir);
    let (session, initial) = Session::new(Arc::new(catalog), layout, RegionCrop::new(region));
    Ok(Driver::new(session, initial))
}

/// Start a session on the requested page, which must exist.
fn open_page(config: &Config, args: &PageArgs, region: CropRegion) -> Result<Driver<RegionCrop>> {
    let mut driver = start_session(config, region)?;
    if driver.session().state().is_empty() {
        bail!("no editions published yet");
    }
    seek(&mut driver, args)?;
    Ok(driver)
}

fn seek(driver: &mut Driver<RegionCrop>, args: &PageArgs) -> Result<()> {
    if !driver.navigate(args.date, args.page)? {
        let state = driver.session().state();
        let date = state
            .selected_date()
            .ok_or_else(|| anyhow!("no edition selected"))?;
        bail!("edition {date} has only {} pages", state.total_pages());
    }
    Ok(())
}

fn build_compositor(branding: &BrandingConfig) -> Result<Compositor<SwashPainter>> {
    let logo = image::open(&branding.logo)
        .with_context(|| format!("read logo {}", branding.logo.display()))?
        .to_rgba8();
    let font = fs::read(&branding.font)
        .with_context(|| format!("read font {}", branding.font.display()))?;
    let painter =
        SwashPainter::new(font).with_context(|| format!("load font {}", branding.font.display()))?;
    let accent = parse_hex_color(&branding.accent)?;
    let branding = Branding::new(logo)?
        .with_call_to_action(&branding.call_to_action)
        .with_credit(&branding.credit)
        .with_accent(accent);
    Ok(Compositor::new(branding, painter))
}

fn deliver<S: ShareSurface>(
    surface: S,
    share: &ShareConfig,
    paths: &PathsConfig,
    clip: &BrandedImage,
) -> Result<()> {
    let exporter = ShareExporter::new(surface).with_message(&share.title, &share.text);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    match runtime.block_on(exporter.deliver(clip))? {
        Delivery::Shared => println!("Shared clip of {}", clip.date()),
        Delivery::Cancelled => println!("Share cancelled"),
        Delivery::Downloaded(file) => {
            let path = paths.output_dir.join(&file.file_name);
            create_parent(&path)?;
            fs::write(&path, &file.bytes)
                .with_context(|| format!("write clip {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}
