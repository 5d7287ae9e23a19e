use clap::{Parser, Subcommand, ValueEnum};
use codeck::prelude::*;
use itertools::Itertools;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectCli {
    Javascript,
    Hoi4,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModuleTypeCli {
    Esm,
    Commonjs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScriptTypeCli {
    Event,
    Decision,
    NationalFocus,
    Idea,
}

/// Compiles visual-scripting blueprints into source code
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a saved blueprint
    Compile {
        /// Path to the blueprint JSON file
        blueprint_path: PathBuf,

        /// Write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compiler options JSON; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        dialect: Option<DialectCli>,

        /// JavaScript module system
        #[arg(long, value_enum)]
        module_type: Option<ModuleTypeCli>,

        /// Load ES module imports from the skypack CDN
        #[arg(long)]
        skypack: bool,

        /// HOI4 mod namespace
        #[arg(long)]
        namespace: Option<String>,

        /// HOI4 script type
        #[arg(long, value_enum)]
        script_type: Option<ScriptTypeCli>,

        /// Do not prefix node code with trace comments
        #[arg(long)]
        no_comments: bool,
    },
    /// List the node types available in the palette
    Nodes,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compile {
            blueprint_path,
            output,
            config,
            dialect,
            module_type,
            skypack,
            namespace,
            script_type,
            no_comments,
        } => {
            let mut options = match config {
                Some(path) => {
                    let json = fs::read_to_string(&path).unwrap_or_else(|e| {
                        exit_with_error(&format!(
                            "Failed to read config file '{}': {}",
                            path.display(),
                            e
                        ))
                    });
                    CompilerOptions::from_json(&json).unwrap_or_else(|e| {
                        exit_with_error(&format!("Failed to parse config JSON: {}", e))
                    })
                }
                None => CompilerOptions::default(),
            };
            options.dialect = resolve_dialect(
                options.dialect,
                dialect,
                module_type,
                skypack,
                namespace,
                script_type,
            );
            if no_comments {
                options.print_comment = false;
            }
            run_compile(&blueprint_path, output.as_deref(), options);
        }
        Command::Nodes => list_nodes(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies the command-line flags on top of the configured dialect.
fn resolve_dialect(
    configured: Dialect,
    dialect: Option<DialectCli>,
    module_type: Option<ModuleTypeCli>,
    skypack: bool,
    namespace: Option<String>,
    script_type: Option<ScriptTypeCli>,
) -> Dialect {
    let base = match (dialect, configured) {
        (Some(DialectCli::Javascript), current @ Dialect::JavaScript { .. }) => current,
        (Some(DialectCli::Javascript), _) => Dialect::default(),
        (Some(DialectCli::Hoi4), current @ Dialect::Hoi4 { .. }) => current,
        (Some(DialectCli::Hoi4), _) => Dialect::hoi4(),
        (None, current) => current,
    };

    match base {
        Dialect::JavaScript {
            module_type: current_module,
            use_skypack,
        } => Dialect::JavaScript {
            module_type: match module_type {
                Some(ModuleTypeCli::Esm) => ModuleType::EsModule,
                Some(ModuleTypeCli::Commonjs) => ModuleType::CommonJs,
                None => current_module,
            },
            use_skypack: use_skypack || skypack,
        },
        Dialect::Hoi4 {
            namespace: current_namespace,
            script_type: current_script,
        } => Dialect::Hoi4 {
            namespace: namespace.unwrap_or(current_namespace),
            script_type: match script_type {
                Some(ScriptTypeCli::Event) => ScriptType::Event,
                Some(ScriptTypeCli::Decision) => ScriptType::Decision,
                Some(ScriptTypeCli::NationalFocus) => ScriptType::NationalFocus,
                Some(ScriptTypeCli::Idea) => ScriptType::Idea,
                None => current_script,
            },
        },
    }
}

fn run_compile(blueprint_path: &std::path::Path, output: Option<&std::path::Path>, options: CompilerOptions) {
    let start = Instant::now();

    let json = fs::read_to_string(blueprint_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read blueprint file '{}': {}",
            blueprint_path.display(),
            e
        ))
    });

    let mut blueprint = Blueprint::with_builtin_nodes();
    blueprint
        .from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load blueprint: {}", e)));

    let code = CodeCompiler::builder(&blueprint)
        .with_options(options)
        .build()
        .generate()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    match output {
        Some(path) => {
            fs::write(path, &code).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
            });
            eprintln!("Compiled to '{}' in {:?}", path.display(), start.elapsed());
        }
        None => print!("{}", code),
    }
}

fn list_nodes() {
    let blueprint = Blueprint::with_builtin_nodes();
    let by_category = blueprint
        .registry()
        .all_visible()
        .into_iter()
        .chunk_by(|definition| definition.category.clone());

    for (category, definitions) in &by_category {
        println!("{}", category);
        for definition in definitions {
            println!("  {:<10} {}", definition.name, definition.label);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
