//! Command line interface.
//!
//! Without a subcommand the interactive menu starts. The other subcommands
//! load one map, run a single query and print the result.

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::{
    config::{AppConfig, DEFAULT_CONFIG_FILE},
    console::Console,
    ctx::AppContext,
    lang::{Language, MessageId},
    menu::{MenuHandler, format_path},
};

#[derive(Parser, Debug)]
#[command(name = "antmap", version, about = "Antenna map explorer")]
pub struct Cli {
    /// Configuration file [default: .antmap.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interface language
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// Directory holding map files
    #[arg(long, global = true)]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving saved files
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Start the interactive menu
    #[default]
    Menu,
    /// Print the antennas and edges of a map
    Show { file: PathBuf },
    /// Compute the effect positions of a map
    Effects {
        file: PathBuf,
        /// Save the positions under this name in the output directory
        #[arg(long)]
        out: Option<String>,
        /// Save as a dot map instead of a table
        #[arg(long, requires = "out")]
        dots: bool,
    },
    /// Depth-first (or breadth-first) traversal from a vertex
    Traverse {
        file: PathBuf,
        start: usize,
        #[arg(long)]
        bfs: bool,
    },
    /// List every simple path between two vertices
    Paths { file: PathBuf, src: usize, dst: usize },
    /// Danger points of one frequency, or overlaps of two
    Danger {
        file: PathBuf,
        freq: char,
        freq_b: Option<char>,
    },
    /// Re-render a map into the output directory
    Save { file: PathBuf, out: String },
    /// Write the effective configuration to a file
    Init {
        /// Target file [default: .antmap.toml]
        path: Option<PathBuf>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Applies command line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}

/// Runs one command against the context.
pub fn run<R: BufRead, W: Write>(
    ctx: &mut AppContext,
    console: &mut Console<R, W>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Menu => MenuHandler::new(ctx, console).run(),
        Command::Show { file } => show(ctx, console, &file),
        Command::Effects { file, out, dots } => effects(ctx, console, &file, out, dots),
        Command::Traverse { file, start, bfs } => {
            load(ctx, &file)?;
            let graph = ctx.graph()?;
            let order = if bfs {
                graph.bfs_order(start)?
            } else {
                graph.dfs_order(start)?
            };
            for i in order {
                console.println(format!("[{i}] {}", graph.vertices()[i]))?;
            }
            Ok(())
        }
        Command::Paths { file, src, dst } => {
            load(ctx, &file)?;
            let graph = ctx.graph()?;
            let paths = graph.all_paths(src, dst, Some(ctx.config.max_paths))?;
            if paths.is_empty() {
                console.println(ctx.tr(MessageId::ErrNoPaths))?;
            }
            for path in &paths {
                console.println(format_path(graph, path))?;
            }
            Ok(())
        }
        Command::Danger { file, freq, freq_b } => {
            load(ctx, &file)?;
            let graph = ctx.graph()?;
            let found = match freq_b {
                Some(b) => graph.danger_overlaps(freq, b),
                None => graph.danger_points(freq),
            };
            if found.is_empty() {
                console.println(ctx.tr(MessageId::ErrNothingFound))?;
            }
            for c in &found {
                console.println(c)?;
            }
            Ok(())
        }
        Command::Save { file, out } => {
            load(ctx, &file)?;
            let path = ctx.output_path(&out)?;
            ctx.graph()?.save_dot_map(&path)?;
            info!("wrote {}", path.display());
            console.success(format!("{}: {}", ctx.tr(MessageId::SuccessSave), path.display()))?;
            Ok(())
        }
        Command::Init { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            if path.exists() && !force {
                bail!("{} already exists, use --force to replace it", path.display());
            }
            ctx.config.save(&path)?;
            info!("configuration written to {}", path.display());
            console.success(format!("{}: {}", ctx.tr(MessageId::SuccessSave), path.display()))?;
            Ok(())
        }
    }
}

/// Loads `file` as given, or relative to the input directory when it does
/// not exist as given.
fn load(ctx: &mut AppContext, file: &Path) -> anyhow::Result<()> {
    let path = if file.exists() {
        file.to_path_buf()
    } else {
        ctx.input_path(file)
    };
    ctx.load_graph(&path)
        .with_context(|| format!("failed to load map {}", file.display()))?;
    Ok(())
}

fn show<R: BufRead, W: Write>(
    ctx: &mut AppContext,
    console: &mut Console<R, W>,
    file: &Path,
) -> anyhow::Result<()> {
    load(ctx, file)?;
    let graph = ctx.graph()?;

    console.heading(format!(
        "{} ({}):",
        ctx.tr(MessageId::AntennasHeader),
        graph.vertex_count()
    ))?;
    for (i, v) in graph.vertices().iter().enumerate() {
        console.println(format!("[{i}] {v}"))?;
    }

    let edges = graph.edges();
    console.heading(format!("{} ({}):", ctx.tr(MessageId::EdgesHeader), edges.len()))?;
    for (a, b) in edges {
        console.println(format!("{a} - {b}"))?;
    }
    Ok(())
}

fn effects<R: BufRead, W: Write>(
    ctx: &mut AppContext,
    console: &mut Console<R, W>,
    file: &Path,
    out: Option<String>,
    dots: bool,
) -> anyhow::Result<()> {
    load(ctx, file)?;
    let effects = ctx.refresh_effects()?.clone();

    console.heading(format!(
        "{} ({}):",
        ctx.tr(MessageId::EffectsHeader),
        effects.len()
    ))?;
    console.print(effects.to_table())?;

    if let Some(name) = out {
        let path = ctx.output_path(&name)?;
        if dots {
            effects.save_dot_map(&path)?;
        } else {
            effects.save_table(&path)?;
        }
        info!("wrote {}", path.display());
        console.success(format!("{}: {}", ctx.tr(MessageId::SuccessSave), path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const MAP: &str = "a.b\n.a.\nb.a\n";

    fn setup() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("map.txt"), MAP).unwrap();
        let config = AppConfig {
            input_dir: input,
            output_dir: dir.path().join("output"),
            ..Default::default()
        };
        (dir, AppContext::new(config))
    }

    fn run_capture(ctx: &mut AppContext, command: Command) -> String {
        let mut console = Console::new(&b""[..], Vec::new());
        run(ctx, &mut console, command).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_defaults_to_menu() {
        let cli = Cli::try_parse_from(["antmap"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Menu);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "antmap", "traverse", "map.txt", "2", "--bfs", "--lang", "pt", "--input-dir", "maps",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Traverse {
                file: "map.txt".into(),
                start: 2,
                bfs: true
            })
        );

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.language, Language::Pt);
        assert_eq!(config.input_dir, PathBuf::from("maps"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_parse_dots_requires_out() {
        assert!(Cli::try_parse_from(["antmap", "effects", "m.txt", "--dots"]).is_err());
        assert!(Cli::try_parse_from(["antmap", "effects", "m.txt", "--dots", "--out", "e"]).is_ok());
    }

    #[test]
    fn test_traverse() {
        let (_dir, mut ctx) = setup();
        let out = run_capture(
            &mut ctx,
            Command::Traverse {
                file: "map.txt".into(),
                start: 4,
                bfs: false,
            },
        );
        assert_eq!(out, "[4] (2,2) a\n[0] (0,0) a\n[2] (1,1) a\n");
    }

    #[test]
    fn test_paths() {
        let (_dir, mut ctx) = setup();
        let out = run_capture(
            &mut ctx,
            Command::Paths {
                file: "map.txt".into(),
                src: 0,
                dst: 4,
            },
        );
        assert_eq!(out, "(0,0) -> (1,1) -> (2,2)\n(0,0) -> (2,2)\n");
    }

    #[test]
    fn test_danger_points() {
        let (_dir, mut ctx) = setup();
        let out = run_capture(
            &mut ctx,
            Command::Danger {
                file: "map.txt".into(),
                freq: 'a',
                freq_b: None,
            },
        );
        assert_eq!(out, "(1,1)\n");
    }

    #[test]
    fn test_effects_saved() {
        let (dir, mut ctx) = setup();
        let out = run_capture(
            &mut ctx,
            Command::Effects {
                file: "map.txt".into(),
                out: Some("fx.txt".into()),
                dots: false,
            },
        );
        assert!(out.contains("fx.txt"));
        let saved = fs::read_to_string(dir.path().join("output/fx.txt")).unwrap();
        assert_eq!(saved, ctx.effects.to_table());
        assert!(!ctx.effects.is_empty());
    }

    #[test]
    fn test_save_matrix() {
        let (dir, mut ctx) = setup();
        run_capture(
            &mut ctx,
            Command::Save {
                file: "map.txt".into(),
                out: "copy.txt".into(),
            },
        );
        let saved = fs::read_to_string(dir.path().join("output/copy.txt")).unwrap();
        assert_eq!(saved, MAP);
    }

    #[test]
    fn test_init_writes_config_once() {
        let (dir, mut ctx) = setup();
        ctx.config.max_paths = 7;
        let path = dir.path().join("cfg.toml");
        let init = |force| Command::Init {
            path: Some(path.clone()),
            force,
        };

        run_capture(&mut ctx, init(false));
        assert_eq!(AppConfig::load(Some(path.as_path())).unwrap(), ctx.config);

        let mut console = Console::new(&b""[..], Vec::new());
        assert!(run(&mut ctx, &mut console, init(false)).is_err());
        run_capture(&mut ctx, init(true));
    }

    #[test]
    fn test_missing_map() {
        let (_dir, mut ctx) = setup();
        let mut console = Console::new(&b""[..], Vec::new());
        let err = run(
            &mut ctx,
            &mut console,
            Command::Show {
                file: "nope.txt".into(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
