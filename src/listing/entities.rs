use {
    crate::{
        api::RestError,
        kernel::entities::{
            ListingId,
            UserId,
            ALL_FILTER,
        },
    },
    email_address::EmailAddress,
    time::OffsetDateTime,
};

/// The lowest selectable price bucket on the site has no upper cap: a range
/// whose minimum equals this value applies only the lower bound.
pub const OPEN_ENDED_BUCKET_MIN: i64 = 8000;

#[derive(Clone, Debug)]
pub struct Listing {
    pub id:                         ListingId,
    /// Monotonic insertion sequence, the recency proxy for newest-first
    /// ordering.
    pub seq:                        u64,
    pub seller_email:               EmailAddress,
    pub seller_id:                  UserId,
    pub seller_name:                Option<String>,
    pub car_name:                   Option<String>,
    pub car_brand:                  Option<String>,
    pub car_type:                   Option<String>,
    pub price:                      Option<i64>,
    pub car_condition:              Option<String>,
    pub purchasing_date:            Option<String>,
    pub description:                Option<String>,
    pub photo:                      Option<String>,
    pub approval_status:            Option<String>,
    pub adding_date:                Option<String>,
    pub manufacture_year:           Option<String>,
    pub engine_capacity:            Option<String>,
    pub total_run:                  Option<String>,
    pub fuel_type:                  Option<String>,
    pub transmission_type:          Option<String>,
    pub registered_year:            Option<String>,
    pub seller_phone:               Option<String>,
    pub sell_status:                Option<String>,
    pub seller_verification_status: Option<String>,
    pub total_bids:                 u64,
    pub creation_time:              OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct ListingCreate {
    pub seller_email:               EmailAddress,
    pub seller_id:                  UserId,
    pub seller_name:                Option<String>,
    pub car_name:                   Option<String>,
    pub car_brand:                  Option<String>,
    pub car_type:                   Option<String>,
    pub price:                      Option<i64>,
    pub car_condition:              Option<String>,
    pub purchasing_date:            Option<String>,
    pub description:                Option<String>,
    pub photo:                      Option<String>,
    pub approval_status:            Option<String>,
    pub adding_date:                Option<String>,
    pub manufacture_year:           Option<String>,
    pub engine_capacity:            Option<String>,
    pub total_run:                  Option<String>,
    pub fuel_type:                  Option<String>,
    pub transmission_type:          Option<String>,
    pub registered_year:            Option<String>,
    pub seller_phone:               Option<String>,
    pub sell_status:                Option<String>,
    pub seller_verification_status: Option<String>,
}

/// The full descriptive field set of a listing update. Every field is
/// written unconditionally: omitting one from the payload overwrites the
/// stored value with absent. Ownership, status and counter fields are not
/// part of the replace set and survive the update.
#[derive(Clone, Debug, Default)]
pub struct ListingReplace {
    pub car_name:          Option<String>,
    pub car_brand:         Option<String>,
    pub car_type:          Option<String>,
    pub price:             Option<i64>,
    pub car_condition:     Option<String>,
    pub purchasing_date:   Option<String>,
    pub description:       Option<String>,
    pub photo:             Option<String>,
    pub approval_status:   Option<String>,
    pub adding_date:       Option<String>,
    pub manufacture_year:  Option<String>,
    pub engine_capacity:   Option<String>,
    pub total_run:         Option<String>,
    pub fuel_type:         Option<String>,
    pub transmission_type: Option<String>,
    pub registered_year:   Option<String>,
    pub seller_phone:      Option<String>,
}

/// Inclusive price bounds parsed from the `"min-max"` query encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    /// `"all"` disables the clause; anything else must be two integers
    /// separated by a dash.
    pub fn parse(raw: &str) -> Result<Option<Self>, RestError> {
        if raw == ALL_FILTER {
            return Ok(None);
        }
        let invalid = || RestError::BadParameters(format!("Invalid price range: {}", raw));
        let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
        Ok(Some(Self {
            min: min.trim().parse().map_err(|_| invalid())?,
            max: max.trim().parse().map_err(|_| invalid())?,
        }))
    }

    pub fn matches(&self, price: i64) -> bool {
        if self.min == OPEN_ENDED_BUCKET_MIN {
            price >= self.min
        } else {
            self.min <= price && price <= self.max
        }
    }
}

/// Clauses are independent and combined with logical AND; `None` imposes no
/// restriction.
#[derive(Clone, Debug, Default)]
pub struct ListingFilter {
    pub condition: Option<String>,
    pub brand:     Option<String>,
    pub price:     Option<PriceRange>,
}

impl ListingFilter {
    /// Maps the `"all"` sentinel to an absent clause.
    pub fn clause(raw: &str) -> Option<String> {
        if raw == ALL_FILTER {
            None
        } else {
            Some(raw.to_string())
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(condition) = &self.condition {
            if !contains_ignore_case(&listing.car_condition, condition) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !contains_ignore_case(&listing.car_brand, brand) {
                return false;
            }
        }
        if let Some(range) = &self.price {
            // A listing without a price never matches an active price clause.
            if !listing.price.is_some_and(|price| range.matches(price)) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(field: &Option<String>, needle: &str) -> bool {
    field
        .as_ref()
        .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

#[derive(Clone, Debug)]
pub struct ListingQuery {
    pub per_page: usize,
    pub page:     usize,
    pub filter:   ListingFilter,
}

#[derive(Clone, Debug)]
pub struct ListingPage {
    pub total_pages: usize,
    pub listings:    Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_parse() {
        assert_eq!(PriceRange::parse("all").unwrap(), None);
        assert_eq!(
            PriceRange::parse("10000-15000").unwrap(),
            Some(PriceRange {
                min: 10000,
                max: 15000,
            })
        );
        assert!(PriceRange::parse("cheap").is_err());
        assert!(PriceRange::parse("8000-").is_err());
    }

    #[test]
    fn test_open_ended_bucket_ignores_upper_bound() {
        let range = PriceRange {
            min: OPEN_ENDED_BUCKET_MIN,
            max: 9000,
        };
        assert!(range.matches(50000));
        assert!(range.matches(8000));
        assert!(!range.matches(7999));
    }

    #[test]
    fn test_bounded_range_is_inclusive() {
        let range = PriceRange {
            min: 10000,
            max: 15000,
        };
        assert!(range.matches(10000));
        assert!(range.matches(15000));
        assert!(!range.matches(9999));
        assert!(!range.matches(15001));
    }

    #[test]
    fn test_clause_sentinel() {
        assert_eq!(ListingFilter::clause("all"), None);
        assert_eq!(ListingFilter::clause("toyota"), Some("toyota".to_string()));
    }
}
