//! CKEditor 5 package generator - scaffolds a new CKEditor 5 package

use anyhow::Result;
use clap::Parser;
use generator_core::tui::CreateArgs;
use generator_core::workflow::{self, GenerationReport};
use generator_core::{ConsoleLogger, Layout, PackageManager, Variant};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "ckeditor5-package-generator")]
#[command(about = "CLI for scaffolding CKEditor 5 packages")]
#[command(version)]
pub struct Args {
    /// Scoped package name, e.g. @scope/ckeditor5-feature
    pub package_name: Option<String>,

    /// Programming language of the package
    #[arg(long, value_enum)]
    pub lang: Option<Variant>,

    /// Name of the plugin class (defaults to the package name in PascalCase)
    #[arg(long = "plugin-name")]
    pub plugin_name: Option<String>,

    /// Global variable name of the DLL build
    #[arg(long = "global-name")]
    pub global_name: Option<String>,

    /// Installation methods the package supports
    #[arg(long = "installation-methods", value_enum)]
    pub installation_methods: Option<Layout>,

    /// Package manager used for scripts and installing dependencies
    #[arg(long = "package-manager", value_enum, default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Reference the local ckeditor5-package-tools checkout (for development use)
    #[arg(long)]
    pub dev: bool,

    /// Fail on undefined template variables
    #[arg(long)]
    pub strict: bool,

    /// Print every created file and command output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not install dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Do not initialize a Git repository
    #[arg(long = "skip-git")]
    pub skip_git: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            package_name: args.package_name,
            plugin_name: args.plugin_name,
            global_name: args.global_name,
            lang: args.lang,
            installation_methods: args.installation_methods,
            package_manager: args.package_manager,
            template_dir: args.template_dir,
            dev: args.dev,
            strict: args.strict,
            verbose: args.verbose,
            skip_install: args.skip_install,
            skip_git: args.skip_git,
            yes: args.yes,
        }
    }
}

/// Generate without any prompt, logging to the console
async fn run_non_interactive(args: CreateArgs) -> Result<()> {
    let package_name = args
        .package_name
        .clone()
        .ok_or_else(|| anyhow::anyhow!("A package name is required in non-interactive mode."))?;
    let logger = ConsoleLogger::new(args.verbose);
    let request = args.into_request(package_name)?;

    let library = request.template_library();
    if let Some(warning) = workflow::check_library(library.as_ref(), CLI_VERSION)? {
        eprintln!("{}", warning);
    }

    let report = workflow::generate_package(&request, &logger).await?;
    print_summary(&report, request.package_manager);

    Ok(())
}

fn print_summary(report: &GenerationReport, package_manager: PackageManager) {
    if let Some(error) = &report.install_error {
        eprintln!("Installing dependencies failed: {}", error);
    }
    if let Some(error) = &report.git_error {
        eprintln!("Initializing the Git repository failed: {}", error);
    }

    println!();
    println!(
        "Created {} files in {}",
        report.files.len(),
        report.destination.display()
    );
    println!();
    println!("  Next steps");
    println!();
    for (i, step) in workflow::next_steps(&report.destination, package_manager)
        .iter()
        .enumerate()
    {
        println!("  {}.  {}", i + 1, step);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args: CreateArgs = Args::parse().into();

    if args.yes {
        return run_non_interactive(args).await;
    }

    let result = generator_core::run(args, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
