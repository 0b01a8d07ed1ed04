use clap::Parser;
use formsite::application::{
    init::InitService, manage_config::ConfigService, FormsService, ListPagesService,
    RenderHeadService,
};
use formsite::cli::{format_form, format_form_list, format_page_list, Cli, Commands};
use formsite::error::FormsiteError;
use formsite::infrastructure::FileSystemRepository;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr, filtered by FORMSITE_LOG (default: warn)
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FORMSITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), FormsiteError> {
    match cli.command {
        Commands::Init {
            path,
            name,
            base_url,
        } => InitService::execute(&path, &name, &base_url),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("site_name = {}", config.site_name);
                println!("base_url = {}", config.base_url);
                println!("og_type = {}", config.defaults.og_type);
                println!("twitter_card = {}", config.defaults.twitter_card);
                println!(
                    "og_image = {}",
                    config.defaults.og_image.as_deref().unwrap_or("")
                );
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: formsite config [--list | <key> [<value>]]");
                println!("Valid keys: site_name, base_url, og_type, twitter_card, og_image, created");
                Ok(())
            }
        }
        Commands::Pages => {
            let repo = FileSystemRepository::discover()?;
            let pages = ListPagesService::new(repo).execute()?;
            print!("{}", format_page_list(&pages));
            if pages.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Head { slug, check } => {
            let repo = FileSystemRepository::discover()?;
            let service = RenderHeadService::new(repo);

            if check {
                let result = service.check(&slug)?;
                print!("{}", result.active);
                println!(
                    "Restored: {} created tag(s) removed, {} updated tag(s) reverted",
                    result.created, result.updated
                );
            } else {
                print!("{}", service.execute(&slug)?);
            }
            Ok(())
        }
        Commands::Forms => {
            let repo = FileSystemRepository::discover()?;
            let forms = FormsService::new(repo).list()?;
            print!("{}", format_form_list(&forms));
            if forms.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Form { id } => {
            let repo = FileSystemRepository::discover()?;
            let form = FormsService::new(repo).show(&id)?;
            print!("{}", format_form(&form));
            Ok(())
        }
    }
}
