use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use nps_sites::filter::{unique_designations, unique_regions};
use nps_sites::generate::{run_generate, write_chart_csv, GenerateOptions};
use nps_sites::load::{is_url, load_sites};
use nps_sites::render;
use nps_sites::utils::osc8_file_link;
use nps_sites::{
    filter_sites, group_by_year, layout_timeline, map_center, map_markers, recent_sites,
    sort_sites, year_counts, FilterCriteria, RegionFilter, SiteRecord, SortKey, StampsFilter,
    ViewConfig, YearGrouping, DEFAULT_ABOLISHED_PATH, DEFAULT_SITES_PATH, MAX_WINDOW_YEARS,
};

#[derive(Parser)]
#[command(name = "nps-sites")]
#[command(about = "Explore the National Park Service sites dataset")]
struct Cli {
    /// Sites dataset (path or http(s) URL)
    #[arg(long, global = true, default_value = DEFAULT_SITES_PATH)]
    data: String,
    /// Abolished sites dataset (path or http(s) URL)
    #[arg(long, global = true, default_value = DEFAULT_ABOLISHED_PATH)]
    abolished_data: String,
    /// CONL file with default filter and view settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Filter flags; anything given here overrides the config file
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Region to show, or "all"
    #[arg(long)]
    region: Option<RegionFilter>,
    #[arg(long, value_enum)]
    stamps: Option<StampsFilter>,
    /// Designation to include (repeatable); none means all
    #[arg(long = "designation")]
    designations: Vec<String>,
    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,
    /// Only sites with an established date
    #[arg(long)]
    require_established: bool,
}

impl FilterArgs {
    fn apply(&self, mut criteria: FilterCriteria) -> FilterCriteria {
        if let Some(ref region) = self.region {
            criteria.region = region.clone();
        }
        if let Some(stamps) = self.stamps {
            criteria.stamps = stamps;
        }
        if !self.designations.is_empty() {
            criteria.designations = self.designations.iter().cloned().collect();
        }
        if let Some(ref search) = self.search {
            criteria.search = search.clone();
        }
        if self.require_established {
            criteria.require_established = true;
        }
        criteria
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List sites as cards or a condensed list
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Names only
        #[arg(long)]
        condensed: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Sites added in the last few years, grouped by year
    Recent {
        /// Last year of the window (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Number of years in the window
        #[arg(long, value_parser = window_parser())]
        window: Option<u32>,
        #[arg(long)]
        condensed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Group filtered sites by every established year present
    Years {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        condensed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Sites established per year
    Chart {
        #[command(flatten)]
        filters: FilterArgs,
        /// Also write the counts to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Sites with coordinates
    Map {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Timeline of abolished sites
    Abolished {
        /// Text width of the timeline track
        #[arg(long, default_value_t = 72)]
        columns: usize,
        #[arg(long)]
        json: bool,
    },
    /// List the regions and designations present in the data
    Regions,
    /// Write every view as JSON (and the chart as CSV) to a directory
    Generate {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = window_parser())]
        window: Option<u32>,
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn window_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_YEARS))
}

fn load(source: &str, quiet: bool) -> Result<Vec<SiteRecord>> {
    if !quiet {
        eprintln!("Loading {}...", source);
    }
    let sites = load_sites(source)?;
    if !quiet {
        eprintln!("Loaded {} records", sites.len());
    }
    Ok(sites)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };
    let quiet = cli.quiet;

    match cli.command {
        Commands::List {
            filters,
            sort,
            condensed,
            json,
        } => {
            let sites = load(&cli.data, quiet)?;
            let criteria = filters.apply(config.criteria());
            let filtered = filter_sites(&sites, &criteria);
            let sorted = sort_sites(&filtered, sort.unwrap_or(config.sort_key()));
            if json {
                print_json(&sorted)?;
            } else {
                print!("{}", render::render_list(&sorted, condensed));
            }
        }
        Commands::Recent {
            year,
            window,
            condensed,
            json,
        } => {
            let sites = load(&cli.data, quiet)?;
            let start_year = year.unwrap_or(config.reference_year());
            let window_size = window.unwrap_or(config.window_size());
            let recent = recent_sites(&sites, start_year, window_size);
            let buckets = group_by_year(
                recent,
                YearGrouping::FixedWindow {
                    start_year,
                    window_size,
                },
            );
            if json {
                print_json(&buckets)?;
            } else {
                println!("Recently added NPS sites (last {} years)\n", window_size);
                print!("{}", render::render_year_buckets(&buckets, condensed));
            }
        }
        Commands::Years {
            filters,
            condensed,
            json,
        } => {
            let sites = load(&cli.data, quiet)?;
            let criteria = filters.apply(config.criteria());
            let filtered = filter_sites(&sites, &criteria);
            let buckets = group_by_year(filtered, YearGrouping::FullRange);
            if json {
                print_json(&buckets)?;
            } else {
                print!("{}", render::render_year_buckets(&buckets, condensed));
            }
        }
        Commands::Chart { filters, csv, json } => {
            let sites = load(&cli.data, quiet)?;
            let criteria = filters.apply(config.criteria());
            let chart = year_counts(filter_sites(&sites, &criteria));
            if let Some(path) = csv {
                write_chart_csv(&path, &chart)?;
                if !quiet {
                    eprintln!("Wrote {}", osc8_file_link(&path, &path.display().to_string()));
                }
            }
            if json {
                print_json(&chart)?;
            } else {
                print!("{}", render::render_chart(&chart));
            }
        }
        Commands::Map { filters, json } => {
            let sites = load(&cli.data, quiet)?;
            let criteria = filters.apply(config.criteria());
            let markers = map_markers(filter_sites(&sites, &criteria));
            let center = map_center(&markers);
            if json {
                print_json(&serde_json::json!({ "center": center, "markers": markers }))?;
            } else {
                print!("{}", render::render_map(&markers, center));
            }
        }
        Commands::Abolished { columns, json } => {
            let abolished = load(&cli.abolished_data, quiet)?;
            let shown: Vec<&SiteRecord> = abolished.iter().filter(|s| s.is_listable()).collect();
            let Some(layout) = layout_timeline(&abolished, &shown, &config.track_metrics()) else {
                bail!(
                    "No abolished sites with both an established and an abolished year in {}",
                    cli.abolished_data
                );
            };
            if json {
                print_json(&layout)?;
            } else {
                println!("Abolished NPS sites timeline\n");
                print!("{}", render::render_timeline(&layout, columns));
            }
        }
        Commands::Regions => {
            let sites = load(&cli.data, quiet)?;
            print!(
                "{}",
                render::render_catalog(&unique_regions(&sites), &unique_designations(&sites))
            );
        }
        Commands::Generate {
            filters,
            sort,
            year,
            window,
            output,
        } => {
            let sites = load(&cli.data, quiet)?;
            let abolished = if is_url(&cli.abolished_data)
                || Path::new(&cli.abolished_data).exists()
            {
                Some(load(&cli.abolished_data, quiet)?)
            } else {
                if !quiet {
                    eprintln!(
                        "No abolished dataset at {}, skipping timeline",
                        cli.abolished_data
                    );
                }
                None
            };
            let options = GenerateOptions {
                criteria: filters.apply(config.criteria()),
                sort: sort.unwrap_or(config.sort_key()),
                reference_year: year.unwrap_or(config.reference_year()),
                window_size: window.unwrap_or(config.window_size()),
                metrics: config.track_metrics(),
                output_dir: output,
                quiet,
            };
            run_generate(&sites, abolished.as_deref(), &options)?;
        }
    }

    Ok(())
}
