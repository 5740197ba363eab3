//! Filtering and ordering of listings and applications.

use std::{fmt, str::FromStr};

use thiserror::Error;

use vm_boundary::{ApplicationStatus, Visa, VisaApplication, VisaType};

/// Number of listings shown on the home page.
pub const LATEST_LIMIT: usize = 6;

/// Sort key sent to the API to get the newest listings first.
pub const NEWEST_FIRST: &str = "-createdAt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Order as returned by the API.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    ProcessingAsc,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::ProcessingAsc,
    ];

    /// Value used in select options and query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::ProcessingAsc => "processing-asc",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::ProcessingAsc => "Processing: Fastest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort order: {0}")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownSortOrder(s.to_owned()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait SortVisas {
    /// Stable sort, equal elements keep their relative order.
    fn sort_visas(&mut self, order: SortOrder);
}

impl SortVisas for [Visa] {
    fn sort_visas(&mut self, order: SortOrder) {
        match order {
            SortOrder::Default => {}
            SortOrder::PriceAsc => self.sort_by(|a, b| a.fee.total_cmp(&b.fee)),
            SortOrder::PriceDesc => self.sort_by(|a, b| b.fee.total_cmp(&a.fee)),
            SortOrder::ProcessingAsc => {
                self.sort_by(|a, b| a.processing_time.cmp(&b.processing_time));
            }
        }
    }
}

/// Parameters of the listing browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisaFilter {
    /// Matched against the country name, case insensitive.
    pub search: String,
    /// `None` means all visa types.
    pub visa_type: Option<VisaType>,
    pub sort: SortOrder,
}

impl VisaFilter {
    #[must_use]
    pub fn matches(&self, visa: &Visa) -> bool {
        let search = self.search.trim().to_lowercase();
        let type_matches = self.visa_type.is_none_or(|t| t == visa.visa_type);
        type_matches && (search.is_empty() || visa.country_name.to_lowercase().contains(&search))
    }

    /// Filters and sorts the listings returned by the API.
    #[must_use]
    pub fn apply(&self, visas: Vec<Visa>) -> Vec<Visa> {
        let mut visas: Vec<_> = visas.into_iter().filter(|v| self.matches(v)).collect();
        visas.sort_visas(self.sort);
        visas
    }
}

/// Parameters of the application list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub country: String,
    /// `None` means all statuses.
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    #[must_use]
    pub fn matches(&self, app: &VisaApplication) -> bool {
        let country = self.country.trim().to_lowercase();
        self.status.is_none_or(|s| s == app.status)
            && (country.is_empty() || app.visa_info.country_name.to_lowercase().contains(&country))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub processing: usize,
}

impl StatusSummary {
    pub fn new<'a>(apps: impl IntoIterator<Item = &'a VisaApplication>) -> Self {
        apps.into_iter().fold(Self::default(), |mut acc, app| {
            acc.total += 1;
            match app.status {
                ApplicationStatus::Pending => acc.pending += 1,
                ApplicationStatus::Approved => acc.approved += 1,
                ApplicationStatus::Rejected => acc.rejected += 1,
                ApplicationStatus::Processing => acc.processing += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use vm_boundary::ApplicationMethod;

    use super::*;

    fn visa(id: &str, country: &str, fee: f64, processing: &str) -> Visa {
        Visa {
            id: id.into(),
            country_name: country.into(),
            country_image: String::new(),
            visa_type: VisaType::Tourist,
            processing_time: processing.into(),
            fee,
            validity: 1,
            application_method: ApplicationMethod::Online,
            age_restriction: None,
            description: String::new(),
            required_documents: vec![],
            added_by: "owner@example.com".into(),
        }
    }

    fn ids(visas: &[Visa]) -> Vec<&str> {
        visas.iter().map(|v| v.id.as_str()).collect()
    }

    fn listings() -> Vec<Visa> {
        vec![
            visa("a", "Japan", 120.0, "10 days"),
            visa("b", "Canada", 80.0, "5 days"),
            visa("c", "Brazil", 200.0, "15 days"),
            visa("d", "Chile", 80.0, "1 week"),
        ]
    }

    #[test]
    fn price_ascending_and_descending() {
        let mut visas = listings();
        visas.sort_visas(SortOrder::PriceAsc);
        assert_eq!(ids(&visas), ["b", "d", "a", "c"]);
        visas.sort_visas(SortOrder::PriceDesc);
        assert_eq!(ids(&visas), ["c", "a", "b", "d"]);
    }

    #[test]
    fn cheaper_listing_comes_first() {
        let mut visas = listings();
        visas.sort_visas(SortOrder::PriceAsc);
        for pair in visas.windows(2) {
            assert!(pair[0].fee <= pair[1].fee);
        }
    }

    #[test]
    fn sorting_is_idempotent() {
        for order in SortOrder::ALL {
            let mut once = listings();
            once.sort_visas(order);
            let mut twice = once.clone();
            twice.sort_visas(order);
            assert_eq!(once, twice, "{order:?}");
        }
    }

    #[test]
    fn processing_time_is_lexicographic() {
        let mut visas = listings();
        visas.sort_visas(SortOrder::ProcessingAsc);
        assert_eq!(ids(&visas), ["d", "a", "c", "b"]);
    }

    #[test]
    fn default_order_is_untouched() {
        let mut visas = listings();
        visas.sort_visas(SortOrder::Default);
        assert_eq!(ids(&visas), ["a", "b", "c", "d"]);
    }

    #[test]
    fn search_matches_only_one_country() {
        let visas = vec![
            visa("1", "Japan", 100.0, "x"),
            visa("2", "Germany", 100.0, "x"),
        ];
        let filter = VisaFilter {
            search: "jap".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(visas)), ["1"]);
    }

    #[test]
    fn filter_by_type() {
        let mut visas = listings();
        visas[2].visa_type = VisaType::Work;
        let filter = VisaFilter {
            visa_type: Some(VisaType::Work),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(visas)), ["c"]);
    }

    #[test]
    fn sort_order_select_values() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>(), Ok(order));
        }
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn summary_and_application_filter() {
        let app = |status, country: &str| VisaApplication {
            id: String::new(),
            visa_info: visa("v", country, 1.0, "x"),
            applicant_id: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            passport_number: String::new(),
            passport_expiry: String::new(),
            fee: 1.0,
            status,
            applied_date: OffsetDateTime::UNIX_EPOCH,
        };
        let apps = [
            app(ApplicationStatus::Pending, "Japan"),
            app(ApplicationStatus::Pending, "Chile"),
            app(ApplicationStatus::Approved, "Japan"),
            app(ApplicationStatus::Rejected, "Peru"),
        ];
        let summary = StatusSummary::new(&apps);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.approved, 1);
        assert_eq!(summary.rejected, 1);

        let filter = ApplicationFilter {
            country: "japan".into(),
            status: Some(ApplicationStatus::Pending),
        };
        assert_eq!(apps.iter().filter(|a| filter.matches(a)).count(), 1);
        let all = ApplicationFilter::default();
        assert_eq!(apps.iter().filter(|a| all.matches(a)).count(), 4);
    }
}
