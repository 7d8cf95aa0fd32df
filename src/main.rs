use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portfolio::blog::{format_date, BlogIndex};
use portfolio::config::{self, SiteConfig};
use portfolio::portfolio as record;
use portfolio::site::{self, Site};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Inspect a portfolio site directory.
#[derive(Parser)]
#[command(name = "portfolio", version)]
struct Cli {
    /// The site directory. Defaults to the nearest directory, starting from
    /// the current one, that holds `info.xml` or `.config`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log loader steps to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show maintenance state, theme, and content counts.
    Summary,

    /// Print the portfolio record as JSON.
    Data {
        /// An XML file to parse instead of the site's `info.xml`.
        path: Option<PathBuf>,
    },

    /// Print the site settings as JSON. Warnings go to the log.
    Config {
        /// A settings file to parse instead of the site's `.config`.
        path: Option<PathBuf>,
    },

    /// List published posts.
    Blogs {
        /// Only posts whose title, excerpt or tags contain this text.
        #[arg(long, default_value = "")]
        search: String,

        /// Only posts in this category.
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Print a post rendered as HTML.
    Post { id: String },

    /// Show whether maintenance mode is on, with its message and estimated
    /// time.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = Root {
        explicit: cli.root,
        start: std::env::current_dir()?,
    };

    match cli.command {
        Command::Summary => summary(&root.dir()?),
        Command::Data { path } => {
            let path = root.file(path, site::PORTFOLIO_FILE)?;
            println!("{}", serde_json::to_string_pretty(&data(&path)?)?);
            Ok(())
        }
        Command::Config { path } => {
            let path = root.file(path, site::CONFIG_FILE)?;
            let settings = config::parse(&read(&path)?);
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Command::Blogs { search, category } => {
            let path = root.file(None, site::BLOG_INDEX_FILE)?;
            let index = BlogIndex::from_json(&read(&path)?)
                .with_context(|| format!("Parsing '{}'", path.display()))?;
            for blog in index.search(&search, &category) {
                println!(
                    "{}\t{}\t{}\t{}",
                    blog.id,
                    format_date(&blog.date),
                    blog.category,
                    blog.title
                );
            }
            Ok(())
        }
        Command::Post { id } => {
            let site = Site::load(&root.dir()?)?;
            print!("{}", site.post(&id)?.to_html());
            Ok(())
        }
        Command::Status => {
            let path = root.file(None, site::CONFIG_FILE)?;
            print!("{}", status(&config::parse(&read(&path)?)));
            Ok(())
        }
    }
}

/// The site directory, resolved only by the commands that need it.
struct Root {
    /// `--root`, when given.
    explicit: Option<PathBuf>,

    /// Where [`Site::locate`] starts otherwise.
    start: PathBuf,
}

impl Root {
    fn dir(&self) -> Result<PathBuf> {
        match &self.explicit {
            Some(root) => Ok(root.clone()),
            None => Ok(Site::locate(&self.start)?),
        }
    }

    /// `path` if given, else `name` in the site directory.
    fn file(&self, path: Option<PathBuf>, name: &str) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path),
            None => Ok(self.dir()?.join(name)),
        }
    }
}

fn data(path: &Path) -> Result<record::PortfolioRecord> {
    record::parse(&read(path)?).with_context(|| format!("Parsing '{}'", path.display()))
}

fn status(config: &SiteConfig) -> String {
    let maintenance = &config.site_settings.maintenance_mode;
    if !maintenance.enabled {
        return String::from("maintenance: off\n");
    }
    let mut out = format!("maintenance: on\nmessage:     {}\n", maintenance.message);
    if !maintenance.estimated_time.is_empty() {
        out.push_str(&format!("estimated:   {}\n", maintenance.estimated_time));
    }
    out
}

fn summary(root: &Path) -> Result<()> {
    let site = Site::load(root)?;
    let settings = &site.config.site_settings;
    println!("root:        {}", site.root.display());
    println!("theme:       {}", settings.theme);
    match &site.content {
        None => print!("{}", status(&site.config)),
        Some(content) => {
            println!("maintenance: off");
            println!("name:        {}", content.portfolio.name);
            println!("projects:    {}", content.portfolio.projects.len());
            println!("posts:       {}", content.blogs.published().count());
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Reading '{}'", path.display()))
}

/// Installs a stderr subscriber filtered by `PORTFOLIO_LOG`, defaulting to
/// `warn` (or `debug` with `--verbose`).
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PORTFOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod test {
    use super::*;

    fn outside() -> Root {
        Root {
            explicit: None,
            start: PathBuf::from("/nonexistent/portfolio/cwd"),
        }
    }

    #[test]
    fn test_explicit_path_needs_no_site() -> Result<()> {
        let root = outside();
        assert!(root.dir().is_err());

        let path = root.file(
            Some(PathBuf::from("./testdata/site/info.xml")),
            site::PORTFOLIO_FILE,
        )?;
        assert_eq!("Ada Lovelace", data(&path)?.name);
        Ok(())
    }

    #[test]
    fn test_default_path_needs_a_site() -> Result<()> {
        assert!(outside().file(None, site::CONFIG_FILE).is_err());

        let root = Root {
            explicit: None,
            start: PathBuf::from("./testdata/site/blogs"),
        };
        assert_eq!(
            Path::new("./testdata/site").join(site::CONFIG_FILE),
            root.file(None, site::CONFIG_FILE)?
        );
        Ok(())
    }

    #[test]
    fn test_status() -> Result<()> {
        let on = config::parse(&read(Path::new("./testdata/maintenance/.config"))?);
        let report = status(&on);
        assert!(report.starts_with("maintenance: on\n"), "{}", report);
        assert!(report.ends_with("estimated:   2 hours\n"), "{}", report);

        let off = config::parse(&read(Path::new("./testdata/site/.config"))?);
        assert_eq!("maintenance: off\n", status(&off));
        Ok(())
    }
}
