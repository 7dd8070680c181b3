//! Charm-style CLI prompts using cliclack

use crate::logger::Logger;
use crate::options::PackageManager;
use crate::package::{validate_package_name, validate_plugin_name, FormattedNames};
use crate::templates::{Layout, Variant};
use crate::workflow::{self, GenerateRequest};
use anyhow::Result;
use std::path::PathBuf;

/// CLI arguments for generating a package
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Scoped package name, prompted for when missing
    pub package_name: Option<String>,

    /// Name of the plugin class
    pub plugin_name: Option<String>,

    /// Global variable name of the DLL build
    pub global_name: Option<String>,

    /// Programming language of the package
    pub lang: Option<Variant>,

    /// Supported installation methods
    pub installation_methods: Option<Layout>,

    pub package_manager: PackageManager,

    /// Local template library instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Reference the local package-tools checkout
    pub dev: bool,

    /// Fail on undefined template variables
    pub strict: bool,

    /// Print every created file and command output
    pub verbose: bool,

    pub skip_install: bool,

    pub skip_git: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    /// Build a request, taking defaults for anything not given on the command line
    pub fn into_request(self, package_name: String) -> Result<GenerateRequest> {
        Ok(GenerateRequest {
            package_name,
            plugin_name: self.plugin_name,
            global_name: self.global_name,
            variant: self.lang.unwrap_or(Variant::Scripted),
            layout: self.installation_methods.unwrap_or(Layout::Standard),
            package_manager: self.package_manager,
            template_dir: self.template_dir.or_else(workflow::template_dir_override),
            parent_dir: std::env::current_dir()?,
            dev: self.dev,
            strict: self.strict,
            install: !self.skip_install,
            git: !self.skip_git,
        })
    }
}

/// Reports generation steps inside the cliclack frame
struct CliclackLogger {
    verbose: bool,
}

impl Logger for CliclackLogger {
    fn process(&self, message: &str) {
        let _ = cliclack::log::step(message);
    }

    fn verbose_info(&self, message: &str) {
        if self.verbose {
            let _ = cliclack::log::remark(message);
        }
    }
}

/// Run the generator with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("CKEditor 5 package generator")?;

    // Step 1: Package name
    let package_name = select_package_name(&args)?;

    // Step 2: Programming language
    let variant = select_variant(&args)?;

    // Step 3: Plugin name
    let plugin_name = select_plugin_name(&args, &package_name)?;

    // Step 4: Installation methods
    let layout = select_layout(&args)?;

    let verbose = args.verbose;
    let mut request = args.into_request(package_name)?;
    request.variant = variant;
    request.layout = layout;
    request.plugin_name = plugin_name;

    // Step 5: Template library
    cliclack::log::info(format!("Using templates from {}", request.template_source()))?;
    let library = request.template_library();
    if let Some(warning) = workflow::check_library(library.as_ref(), cli_version)? {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 6: Generate
    let logger = CliclackLogger { verbose };
    let report = workflow::generate_package(&request, &logger).await?;

    cliclack::log::success(format!(
        "Created {} files in {}",
        report.files.len(),
        report.destination.display()
    ))?;
    if let Some(error) = &report.install_error {
        cliclack::log::warning(format!("Installing dependencies failed: {}", error))?;
    }
    if let Some(error) = &report.git_error {
        cliclack::log::warning(format!("Initializing the Git repository failed: {}", error))?;
    }

    // Step 7: Next steps
    print_next_steps(&request, &report.destination)?;

    Ok(())
}

fn select_package_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.package_name {
        validate_package_name(name)?;
        cliclack::log::info(format!("Package name: {}", name))?;
        return Ok(name.clone());
    }

    if args.yes {
        anyhow::bail!("A package name is required in non-interactive mode.");
    }

    let name: String = cliclack::input("Package name")
        .placeholder("@scope/ckeditor5-feature")
        .validate(|input: &String| validate_package_name(input).map_err(|e| e.to_string()))
        .interact()?;

    Ok(name)
}

fn select_variant(args: &CreateArgs) -> Result<Variant> {
    if let Some(variant) = args.lang {
        cliclack::log::info(format!("Language: {}", variant))?;
        return Ok(variant);
    }

    if args.yes {
        return Ok(Variant::Scripted);
    }

    let variant = cliclack::select("Choose your programming language")
        .item(Variant::Scripted, Variant::Scripted.display_name(), "")
        .item(Variant::Typed, Variant::Typed.display_name(), "")
        .interact()?;

    Ok(variant)
}

fn select_plugin_name(args: &CreateArgs, package_name: &str) -> Result<Option<String>> {
    if let Some(name) = &args.plugin_name {
        validate_plugin_name(name)?;
        return Ok(Some(name.clone()));
    }

    let default = FormattedNames::new(package_name, None).plugin.raw;
    if args.yes {
        return Ok(None);
    }

    let name: String = cliclack::input("Plugin name")
        .placeholder(&default)
        .default_input(&default)
        .validate(|input: &String| validate_plugin_name(input).map_err(|e| e.to_string()))
        .interact()?;

    Ok(if name == default { None } else { Some(name) })
}

fn select_layout(args: &CreateArgs) -> Result<Layout> {
    if let Some(layout) = args.installation_methods {
        cliclack::log::info(format!("Installation methods: {}", layout.display_name()))?;
        return Ok(layout);
    }

    if args.yes {
        return Ok(Layout::Standard);
    }

    let layout = cliclack::select("Which installation methods of CKEditor 5 do you want to support?")
        .item(Layout::Standard, Layout::Standard.display_name(), "")
        .item(
            Layout::Legacy,
            Layout::Legacy.display_name(),
            "also ships the legacy DLL build",
        )
        .interact()?;

    Ok(layout)
}

fn print_next_steps(request: &GenerateRequest, destination: &std::path::Path) -> Result<()> {
    let steps = workflow::next_steps(destination, request.package_manager);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
