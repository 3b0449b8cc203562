use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use techtree::{ConnectorLine, LayoutEngine, LayoutOptions, Model, PixelScale, PlacedNode};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Techtree(techtree::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Techtree(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<techtree::Error> for CliError {
    fn from(value: techtree::Error) -> Self {
        Self::Techtree(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Yaml,
}

impl FromStr for InputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(()),
        }
    }
}

impl InputFormat {
    /// YAML for `.yaml`/`.yml` files, JSON for everything else (including stdin).
    fn for_path(path: Option<&str>) -> Self {
        let ext = path
            .and_then(|p| std::path::Path::new(p).extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: Option<InputFormat>,
    config: Option<String>,
    pretty: bool,
    max_fan_out: Option<usize>,
    detect_cycles: bool,
    spacing: Option<f64>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "techtree-cli\n\
\n\
USAGE:\n\
  techtree-cli [layout] [--pretty] [--format json|yaml] [--config <path>] [--max-fan-out <n>] [--detect-cycles] [--spacing <px>] [--out <path>] [<path>|-]\n\
  techtree-cli validate [--format json|yaml] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - The input format follows the file extension (.yaml/.yml are YAML, anything else JSON).\n\
  - --config reads layout options ({\"maxFanOut\": n, \"detectCycles\": bool}); flags win.\n\
  - --spacing adds pixel coordinates (x/y for nodes, x1/y1/x2/y2 for lines).\n\
  - Set TECHTREE_LOG (e.g. TECHTREE_LOG=debug) to trace layout passes on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--detect-cycles" => args.detect_cycles = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(
                    fmt.parse::<InputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--max-fan-out" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_fan_out = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--spacing" => {
                let Some(px) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let px = px.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(px.is_finite() && px > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.spacing = Some(px);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(a.clone());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TECHTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_model(args: &Args) -> Result<Model, CliError> {
    let text = read_input(args.input.as_deref())?;
    let format = args
        .format
        .unwrap_or_else(|| InputFormat::for_path(args.input.as_deref()));
    let model = match format {
        InputFormat::Json => Model::from_json_str(&text)?,
        InputFormat::Yaml => Model::from_yaml_str(&text)?,
    };
    model.validate()?;
    Ok(model)
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut options = match args.config.as_deref() {
        None => LayoutOptions::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            match InputFormat::for_path(Some(path)) {
                InputFormat::Json => LayoutOptions::from_json_str(&text)?,
                InputFormat::Yaml => LayoutOptions::from_yaml_str(&text)?,
            }
        }
    };
    if let Some(max_fan_out) = args.max_fan_out {
        options = options.with_max_fan_out(max_fan_out);
    }
    if args.detect_cycles {
        options = options.with_detect_cycles(true);
    }
    Ok(options)
}

#[derive(Serialize)]
struct NodeOut<'a> {
    #[serde(flatten)]
    placed: &'a PlacedNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

#[derive(Serialize)]
struct LineOut<'a> {
    #[serde(flatten)]
    line: &'a ConnectorLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    x1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y2: Option<f64>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    nodes: Vec<NodeOut<'a>>,
    lines: Vec<LineOut<'a>>,
}

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let model = read_model(&args)?;

    match args.command {
        Command::Validate => {
            println!(
                "ok: {} nodes, {} domains",
                model.nodes.len(),
                model.domains.len()
            );
            Ok(())
        }
        Command::Layout => {
            let engine = LayoutEngine::new(layout_options(&args)?);
            let layout = engine.layout(&model.nodes)?;
            tracing::info!(
                nodes = layout.nodes.len(),
                lines = layout.lines.len(),
                "layout finished"
            );

            let scale = args
                .spacing
                .map(|spacing| PixelScale::default().with_spacing(spacing));
            let out = LayoutOut {
                nodes: layout
                    .nodes
                    .iter()
                    .map(|placed| {
                        let origin = scale.map(|s| s.node_origin(placed.position));
                        NodeOut {
                            placed,
                            x: origin.map(|p| p.x),
                            y: origin.map(|p| p.y),
                        }
                    })
                    .collect(),
                lines: layout
                    .lines
                    .iter()
                    .map(|line| {
                        let from = scale.map(|s| s.line_endpoint(line.from));
                        let to = scale.map(|s| s.line_endpoint(line.to));
                        LineOut {
                            line,
                            x1: from.map(|p| p.x),
                            y1: from.map(|p| p.y),
                            x2: to.map(|p| p.x),
                            y2: to.map(|p| p.y),
                        }
                    })
                    .collect(),
            };
            write_text(&to_json(&out, args.pretty)?, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
