//! Generates the store-listing graphics and launcher icons.
//!
//! With no arguments, every step runs against the stock manifest from the
//! current directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use storefront_assets::{AssetGroup, AssetManifest, FontLibrary, Generator};

#[derive(Parser, Debug)]
#[command(
    name = "storefront-assets",
    version,
    about = "Generate placeholder store-listing graphics and launcher icons"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON manifest overriding the stock asset tables
    #[arg(long, value_name = "FILE", global = true)]
    manifest: Option<PathBuf>,

    /// Directory that relative manifest paths resolve against
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    root: PathBuf,

    #[command(flatten)]
    fonts: FontSourceArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Listing graphics, screenshots, then launcher icons
    #[default]
    All,
    /// App icon and feature graphic
    Listing,
    /// Phone and tablet screenshot placeholders
    Screenshots,
    /// Launcher icons resized from the master icon
    Icons,
    /// Print the effective manifest as JSON
    Manifest,
}

#[derive(Args, Debug, Clone)]
struct FontSourceArgs {
    /// Skip fonts installed on this machine
    #[arg(long, global = true)]
    no_system_fonts: bool,

    /// Additional font directories to load (repeatable)
    #[arg(long = "font-dir", value_name = "DIR", global = true)]
    font_dir: Vec<PathBuf>,
}

/// Manifest font directories resolve against `--root`; `--font-dir`
/// paths resolve against the working directory like any other CLI path.
fn font_dirs(cli: &Cli, manifest: &AssetManifest) -> Vec<PathBuf> {
    manifest
        .font_dirs
        .iter()
        .map(|dir| cli.root.join(dir))
        .chain(cli.fonts.font_dir.iter().cloned())
        .collect()
}

fn generator(cli: &Cli, manifest: AssetManifest) -> Generator {
    let fonts = FontLibrary::load(!cli.fonts.no_system_fonts, &font_dirs(cli, &manifest));
    Generator::new(manifest, &cli.root, fonts)
}

fn run(cli: Cli) -> storefront_assets::Result<()> {
    let manifest = match &cli.manifest {
        Some(path) => AssetManifest::load(path)?,
        None => AssetManifest::default(),
    };

    let written = match cli.command.unwrap_or_default() {
        Command::Manifest => {
            println!("{}", manifest.to_json_pretty()?);
            return Ok(());
        }
        Command::All => generator(&cli, manifest).run_all()?,
        Command::Listing => generator(&cli, manifest).compose_group(AssetGroup::Listing)?,
        Command::Screenshots => {
            generator(&cli, manifest).compose_group(AssetGroup::Screenshots)?
        }
        Command::Icons => generator(&cli, manifest).launcher_icons()?,
    };

    log::info!("All assets generated successfully ({} files)", written.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Written directly so the failure is reported even with logging off.
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_assets::Error;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("storefront-assets").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn cli_font_dirs_are_not_joined_to_root() {
        let cli = parse(&["--root", "project", "--font-dir", "fonts/extra"]);
        let mut manifest = AssetManifest::default();
        manifest.font_dirs.push(PathBuf::from("tools/fonts"));

        assert_eq!(
            font_dirs(&cli, &manifest),
            vec![
                PathBuf::from("project/tools/fonts"),
                PathBuf::from("fonts/extra"),
            ]
        );
    }

    #[test]
    fn no_arguments_runs_everything() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::All));
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn icons_without_master_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        let cli = parse(&["icons", "--root", root, "--no-system-fonts"]);

        let err = run(cli).unwrap_err();
        assert!(matches!(err, Error::MasterMissing { .. }));
        assert!(!tmp.path().join("android").exists());
    }

    #[test]
    fn full_run_succeeds_without_fonts() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        run(parse(&["--root", root, "--no-system-fonts"])).unwrap();
        assert!(
            tmp.path()
                .join("android/app/src/main/res/mipmap-xxhdpi/ic_launcher.png")
                .exists()
        );
    }
}
