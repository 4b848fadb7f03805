use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Only the first few review snippets fit on a card
const SNIPPETS_PER_CARD: usize = 2;

/// Terminal client for the Myitkyina guide service
#[derive(Debug, Parser)]
#[command(name = "ask", version, about = "Search places in Myitkyina")]
struct Args {
    /// Free-text query, e.g. "ကော်ဖီဆိုင်"
    query: Vec<String>,

    /// Quick-filter category (RESTAURANT, HOTEL, HOSPITAL, LANDMARK, ATM)
    #[arg(short, long, conflicts_with = "preset")]
    category: Option<String>,

    /// Shortcut search: explore or nearby
    #[arg(short, long)]
    preset: Option<String>,

    /// Current latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Current longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// List categories and exit
    #[arg(long)]
    categories: bool,

    /// Base URL of the guide service
    #[arg(long, env = "GUIDE_API_URL", default_value = "http://localhost:8080")]
    url: String,
}

// --- Wire types ---

#[derive(Serialize, Default)]
struct SearchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct PlaceCard {
    title: String,
    uri: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    snippets: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize, Debug)]
struct SearchResult {
    text: String,
    #[serde(default)]
    places: Vec<PlaceCard>,
    query: String,
    location: Location,
    location_source: String,
    maps_search_url: String,
}

#[derive(Deserialize, Debug)]
struct CategoryEntry {
    id: String,
    label: String,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    code: String,
    message: String,
}

// --- Client ---

struct GuideClient {
    base_url: String,
    client: Client,
}

impl GuideClient {
    fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn categories(&self) -> Result<Vec<CategoryEntry>> {
        let resp = self
            .client
            .get(format!("{}/categories", self.base_url))
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn search(&self, payload: &SearchPayload) -> Result<SearchResult> {
        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(payload)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn search_preset(&self, preset: &str, payload: &SearchPayload) -> Result<SearchResult> {
        let resp = self
            .client
            .post(format!("{}/search/preset/{}", self.base_url, preset))
            .json(payload)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .context("Failed to parse response JSON");
        }

        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => bail!("{} ({})", err.error.message, err.error.code),
            Err(_) => bail!("HTTP {} - {}", status, body),
        }
    }
}

// --- Rendering ---

fn print_categories(categories: &[CategoryEntry]) {
    println!("\n{}📂 Categories{}", BOLD, RESET);
    for c in categories {
        println!("  {}{:<12}{} {}", CYAN, c.id, RESET, c.label);
    }
}

fn print_result(result: &SearchResult, elapsed: Duration) {
    let mode = if result.location_source == "gps" {
        format!("{}● GPS Active{}", GREEN, RESET)
    } else {
        format!("{}● City Center Mode{}", YELLOW, RESET)
    };

    println!(
        "\n{}🔎 {}{}  {}  {}({:.4}, {:.4}){}",
        BOLD,
        result.query,
        RESET,
        mode,
        DIM,
        result.location.latitude,
        result.location.longitude,
        RESET
    );
    println!("──────────────────────────────────────────────────────────────");
    println!("{}", result.text.trim());
    println!("──────────────────────────────────────────────────────────────");

    if result.places.is_empty() {
        println!("{}No places found.{}", YELLOW, RESET);
    }

    for (i, place) in result.places.iter().enumerate() {
        println!("\n{}{}. 📍 {}{}", BOLD, i + 1, place.title, RESET);
        println!("   {}{}{}", BLUE, place.uri, RESET);

        let snippets = place.snippets.as_deref().unwrap_or_default();
        for snippet in snippets.iter().take(SNIPPETS_PER_CARD) {
            println!("   💬 {}\"{}\"{}", DIM, snippet, RESET);
        }
        if snippets.is_empty() {
            if let Some(description) = &place.description {
                println!("   {}{}{}", DIM, description, RESET);
            }
        }
    }

    println!("\n{}🗺️  {}{}", CYAN, result.maps_search_url, RESET);
    println!(
        "{}{} places in {:.1}s{}",
        DIM,
        result.places.len(),
        elapsed.as_secs_f64(),
        RESET
    );
}

async fn run(args: Args) -> Result<()> {
    let guide = GuideClient::new(&args.url)?;

    if !guide.check_service_health().await {
        bail!(
            "Service unavailable at {}. Please ensure myitkyina-guide is running.",
            args.url
        );
    }

    if args.categories {
        let categories = guide.categories().await?;
        print_categories(&categories);
        return Ok(());
    }

    let query = args.query.join(" ");
    let payload = SearchPayload {
        query: if query.trim().is_empty() { None } else { Some(query) },
        category: args.category.map(|c| c.to_ascii_uppercase()),
        latitude: args.lat,
        longitude: args.lng,
    };

    let start = Instant::now();
    let result = match args.preset.as_deref() {
        Some(preset) => {
            let coords = SearchPayload {
                latitude: payload.latitude,
                longitude: payload.longitude,
                ..Default::default()
            };
            guide.search_preset(preset, &coords).await?
        }
        None => {
            if payload.query.is_none() && payload.category.is_none() {
                bail!("Give a query, --category or --preset");
            }
            guide.search(&payload).await?
        }
    };

    print_result(&result, start.elapsed());
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{}❌ {:#}{}", RED, e, RESET);
        std::process::exit(1);
    }
}
