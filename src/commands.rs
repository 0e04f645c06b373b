//! CLI command implementations

use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;
use trellis_core::{
    GroupLookup, NameLookup, NodeIndex, Rankings, ScaleRange, ScaleSettings, Scaler, Stat,
    display_value, dump,
};
use trellis_dot::{DotWriter, GroupedView};

use crate::{InputArgs, ScaleArgs};

pub fn render(input: InputArgs, scale: ScaleArgs, out: Option<PathBuf>) -> anyhow::Result<()> {
    let index = read_index()?;
    let rankings = build_rankings(&index, &input);
    let names = NameLookup::build(index.edges(), input.name_key.as_deref());
    let settings = scale_settings(&scale);
    let scaler = Scaler::new(&rankings, settings);

    let grouped = build_grouped(&index, &input);
    let grouped_scaler = grouped
        .as_ref()
        .map(|(_, rankings)| Scaler::new(rankings, settings));
    let grouped_view = grouped
        .as_ref()
        .zip(grouped_scaler.as_ref())
        .map(|((groups, rankings), scaler)| GroupedView {
            groups,
            rankings,
            scaler,
        });

    let source = DotWriter {
        index: &index,
        names: &names,
        rankings: &rankings,
        scaler: &scaler,
        grouped: grouped_view,
        keep_self_loops: input.show_self_loops,
    }
    .render();

    match out {
        None => {
            print!("{source}");
            Ok(())
        }
        Some(path) => write_output(&source, &path),
    }
}

pub fn debug(input: InputArgs) -> anyhow::Result<()> {
    let index = read_index()?;
    let rankings = build_rankings(&index, &input);
    let names = NameLookup::build(index.edges(), input.name_key.as_deref());
    let grouped = build_grouped(&index, &input);

    let value = dump::dump(
        &index,
        &names,
        &rankings,
        grouped.as_ref().map(|(groups, rankings)| (groups, rankings)),
    );
    println!("{value}");
    Ok(())
}

fn read_index() -> anyhow::Result<NodeIndex> {
    let lines: Vec<String> = io::stdin()
        .lock()
        .lines()
        .collect::<Result<_, _>>()
        .context("reading stdin")?;
    let index = NodeIndex::from_lines(lines).context("parsing edge records")?;
    tracing::info!(
        "ingested {} edges, {} distinct nodes",
        index.edges().len(),
        index.nodes().len()
    );
    Ok(index)
}

fn build_rankings(index: &NodeIndex, input: &InputArgs) -> Rankings {
    Rankings::build(Stat::from_edges(index.edges(), input.show_self_loops))
}

/// The grouped companion view, when a grouping key is active. Independent of
/// the plain view; both read the same immutable index.
fn build_grouped(index: &NodeIndex, input: &InputArgs) -> Option<(GroupLookup, Rankings)> {
    let key = input.group_key.as_deref()?;
    let groups = GroupLookup::build(index.edges(), Some(key));
    let stat = Stat::grouped(index, input.show_self_loops, |node| {
        node.attrs.get(key).map(display_value)
    });
    tracing::debug!("grouped by {:?}: {} labels", key, stat.degrees().len());
    Some((groups, Rankings::build(stat)))
}

fn scale_settings(args: &ScaleArgs) -> ScaleSettings {
    ScaleSettings {
        penwidth: ScaleRange::new(args.penwidth_min, args.penwidth_max),
        arrowsize: ScaleRange::new(args.arrowsize_min, args.arrowsize_max),
        weight: ScaleRange::new(args.weight_min, args.weight_max),
        fontsize: ScaleRange::new(args.fontsize_min, args.fontsize_max),
    }
}

/// Write DOT source to `path`, or pipe it through the external `dot`
/// executable when the extension names an image format.
fn write_output(source: &str, path: &Path) -> anyhow::Result<()> {
    let format = path.extension().and_then(|ext| ext.to_str()).unwrap_or("dot");
    if matches!(format, "dot" | "gv") {
        std::fs::write(path, source).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("wrote DOT source to {}", path.display());
        return Ok(());
    }

    let mut child = Command::new("dot")
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .spawn()
        .context("spawning dot; is Graphviz installed?")?;
    {
        let mut stdin = child.stdin.take().context("opening dot stdin")?;
        stdin
            .write_all(source.as_bytes())
            .context("piping source to dot")?;
    }
    let status = child.wait().context("waiting for dot")?;
    if !status.success() {
        anyhow::bail!("dot exited with {status}");
    }
    tracing::info!("rendered {} as {}", path.display(), format);
    Ok(())
}
