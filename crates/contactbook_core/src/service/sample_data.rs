//! Deterministic demo data for empty customer stores.
//!
//! # Responsibility
//! - Parse the embedded sample contact lines into customers.
//! - Derive reproducible birth dates from a seeded RNG.
//!
//! # Invariants
//! - Seeding a repository that already holds customers is a no-op.
//! - Same `seed` and `today` always produce the same customers.

use crate::model::customer::Customer;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::entity_store::RepoResult;
use chrono::{Days, Local, NaiveDate};
use log::{info, warn};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

/// Ages are drawn from `[0, 75)` years before `today`.
const MAX_AGE_DAYS: u64 = 365 * 15 + 365 * 60;

// Format: `First Last 'street address' City postal code`. The city is the
// single token after the address and the postal code is everything after it,
// so multi-word cities split early (`Maple Creek 27817` gives city `Maple`,
// postal code `Creek 27817`) while multi-token codes (`U6B 1NT`) stay whole.
static SAMPLE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+'([^']*)'\s+(\S+)\s+(.+)$").expect("valid sample line regex")
});

const SAMPLE_CUSTOMERS: &[&str] = &[
    "Gabrielle Patel 'P.O. Box 701, 3347 Massa. Street' Saint-Vincent 74978-808",
    "Brian Robinson '1545 Gravida. Rd.' Talcahuano 65005",
    "Eduardo Haugen 'P.O. Box 452, 1063 Risus St.' Melrose 8569",
    "Koen Johansen '152-621 Rutrum Rd.' Plauen 94-173",
    "Alejandro Macdonald '1192 Adipiscing Road' Baarle-Hertog 29192",
    "Angel Karlsson 'P.O. Box 398, 8977 Penatibus Av.' Bonlez U6B 1NT",
    "Yahir Gustavsson '615-2475 Dolor. Road' Maple Creek 27817",
    "Haiden Svensson 'Ap #414-666 Mauris Street' Viggianello 774",
    "Emily Stewart '235 Morbi Avenue' Bradford 60308",
    "Corinne Davis '5934 Imperdiet St.' Etobicoke 53-747",
    "Ryann Davis '629-5812 Adipiscing Av.' Lamorteau E1W 7H6",
    "Yurem Jackson '360-7418 Donec Rd.' Salcito 21687-445",
    "Kelly Gustavsson 'Ap #487-6141 Nunc St.' Hattiesburg 43336",
    "Eileen Walker '9949 Curabitur St.' Mussy-la-Ville 82060",
    "Kately Martin '101-9139 Diam Road' Lutsel K'e 8543",
    "Palestin Carlsson '141-6645 Phasellus Ave' Idar-Oberstei 647522",
    "Quinn Hansson '404-8949 Primis Av.' Calgary P7B 6Z8",
    "Makena Smith 'Ap #100-7117 Morbi Av.' Hull 487036",
    "Danielle Watson 'P.O. Box 522, 6961 Sit Avenue' Tailles 240747",
    "Leland Harris 'P.O. Box 427, 4757 Volutpat. Rd.' Macklin 3373",
    "Gunner Karlsen 'P.O. Box 321, 6674 Aliquet, Ave' Secunderabad 190230",
    "Jamar Olsson '598 Consectetuer, Street' Turnhout 9601 AZ",
    "Lara Martin '1959 Sem St.' Kenosha HH9Z 5RD",
    "Ann Andersson '7681 Morbi Road' Fermont 3947 NR",
    "Remington Andersson '155-1243 Etiam Ave' Santo Domingo 60-111",
    "Rene Carlsson '5726 Interdum Street' Firenze 5383",
    "Elvis Olsen '992-5397 Sed St.' Gatineau 59636",
    "Solomon Olsen '1054 Tincidunt Rd.' Offenbach am Main 91768",
    "Jaydan Jackson 'Ap #611-6171 Commodo Avenue' Berwick H5A 2OW",
    "Bernard Nilsen 'Ap #420-6116 A, St.' Sennariolo 9761",
];

/// Options controlling sample data generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// RNG seed for birth date offsets.
    pub seed: u64,
    /// Reference date birth dates are counted back from.
    pub today: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            today: Local::now().date_naive(),
        }
    }
}

/// Number of embedded sample lines.
pub fn sample_customer_count() -> usize {
    SAMPLE_CUSTOMERS.len()
}

/// Saves the embedded sample customers into an empty repository.
///
/// Returns the number of customers saved; `0` when the repository already
/// held data. The emptiness check and the inserts are one locked step, so
/// concurrent seeders on the same repository seed at most once.
pub fn seed_customers(repo: &CustomerRepository, options: &SeedOptions) -> RepoResult<usize> {
    let customers = sample_customers(options);
    let saved = repo.save_all_if_empty(&customers)?;

    if saved == 0 {
        info!(
            "event=sample_data_seed module=service status=skipped existing={}",
            repo.count()
        );
    } else {
        info!(
            "event=sample_data_seed module=service status=ok customers={} seed={}",
            saved, options.seed
        );
    }
    Ok(saved)
}

fn sample_customers(options: &SeedOptions) -> Vec<Customer> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut customers = Vec::with_capacity(SAMPLE_CUSTOMERS.len());
    for line in SAMPLE_CUSTOMERS {
        let days_old = rng.gen_range(0..MAX_AGE_DAYS);
        let Some(mut customer) = parse_sample_line(line) else {
            warn!("event=sample_data_seed module=service status=skipped_line line={line}");
            continue;
        };
        customer.birth_date = options.today.checked_sub_days(Days::new(days_old));
        customers.push(customer);
    }
    customers
}

fn parse_sample_line(line: &str) -> Option<Customer> {
    let caps = SAMPLE_LINE_RE.captures(line)?;
    let first_name = caps.get(1)?.as_str();
    let last_name = caps.get(2)?.as_str();

    let mut customer = Customer::new(first_name, last_name);
    customer.email = format!(
        "{}@{}.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    customer.address = caps.get(3)?.as_str().to_string();
    customer.city = caps.get(4)?.as_str().to_string();
    customer.postal_code = caps.get(5)?.as_str().trim().to_string();
    Some(customer)
}
