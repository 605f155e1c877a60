use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use skillmatrix::{EditOp, EditorOpts, EditorState, SkillCatalog, SkillMatrix};

#[derive(Parser, Debug)]
#[command(name = "skillmatrix", version)]
struct Cli {
    /// Editor options JSON (palette, new level name, fallback colour).
    #[arg(long, global = true)]
    opts: Option<PathBuf>,

    /// Comma-separated skill catalog, e.g. "Serving,Passing".
    #[arg(long, global = true)]
    skills: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default five-level rubric.
    Template(TemplateArgs),
    /// Print a rubric's levels and per-skill bands.
    Show(ShowArgs),
    /// Apply a JSON edit script to a rubric.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Output rubric JSON.
    #[arg(long)]
    out: PathBuf,

    /// Rubric name.
    #[arg(long, default_value = "Skill Matrix")]
    name: String,

    /// Rubric id.
    #[arg(long, default_value = "default")]
    id: String,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Input rubric JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input rubric JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Edit script: a JSON array of ops.
    #[arg(long)]
    ops: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Write only the update request instead of the full rubric.
    #[arg(long, default_value_t = false)]
    request: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = match &cli.opts {
        Some(path) => EditorOpts::from_path(path)
            .with_context(|| format!("load editor options '{}'", path.display()))?,
        None => EditorOpts::default(),
    };
    let catalog = cli
        .skills
        .as_deref()
        .map(str::parse::<SkillCatalog>)
        .transpose()
        .context("parse --skills")?;

    match cli.cmd {
        Command::Template(args) => cmd_template(args, catalog, &opts),
        Command::Show(args) => cmd_show(args, catalog, &opts),
        Command::Apply(args) => cmd_apply(args, catalog, &opts),
    }
}

fn cmd_template(
    args: TemplateArgs,
    catalog: Option<SkillCatalog>,
    opts: &EditorOpts,
) -> anyhow::Result<()> {
    let catalog = catalog.unwrap_or_default();
    let matrix = skillmatrix::default_matrix(args.id, args.name, &catalog, opts)?;
    write_output(&args.out, &matrix.to_json_pretty()?)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_show(
    args: ShowArgs,
    catalog: Option<SkillCatalog>,
    opts: &EditorOpts,
) -> anyhow::Result<()> {
    let (_, state) = load(&args.in_path, catalog, opts)?;

    println!("{}", state.name());
    for (idx, level) in state.levels().enumerate() {
        println!("  {}. {} {}", idx + 1, level.name, level.color);
    }
    for (skill_idx, skill) in state.skills().iter().enumerate() {
        println!("{skill}");
        for band in state.bands(skill_idx)? {
            let criteria = band.criteria.unwrap_or("-");
            println!(
                "  {:>4} - {:<4} {:<16} {criteria}",
                band.min.to_string(),
                band.max.to_string(),
                band.level.name
            );
        }
    }
    Ok(())
}

fn cmd_apply(
    args: ApplyArgs,
    catalog: Option<SkillCatalog>,
    opts: &EditorOpts,
) -> anyhow::Result<()> {
    let (matrix, state) = load(&args.in_path, catalog, opts)?;
    let ops = EditOp::script_from_path(&args.ops)
        .with_context(|| format!("load edit script '{}'", args.ops.display()))?;

    let report = state.apply_all(&ops, opts)?;
    for (pos, reason) in &report.blocked {
        eprintln!("op {pos} skipped: {reason}");
    }

    let request = skillmatrix::encode(&report.state);
    let json = if args.request {
        request.to_json_pretty()?
    } else {
        matrix.with_update(request).to_json_pretty()?
    };
    write_output(&args.out, &json)?;
    eprintln!(
        "applied {} of {} ops, wrote {}",
        report.applied,
        ops.len(),
        args.out.display()
    );
    Ok(())
}

/// Read and decode a rubric. Without `--skills` the stored skill order is used as the catalog.
fn load(
    path: &Path,
    catalog: Option<SkillCatalog>,
    opts: &EditorOpts,
) -> anyhow::Result<(SkillMatrix, EditorState)> {
    let matrix = SkillMatrix::from_path(path)
        .with_context(|| format!("load rubric '{}'", path.display()))?;
    let catalog = match catalog {
        Some(catalog) => catalog,
        None => SkillCatalog::new(matrix.skills.iter().map(|s| s.skill.clone()))
            .with_context(|| format!("read skills of '{}'", path.display()))?,
    };
    let state = skillmatrix::decode(&matrix, &catalog, opts)
        .with_context(|| format!("decode rubric '{}'", path.display()))?;
    Ok((matrix, state))
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}
