use crate::domain::model::{ListingRecord, Rejection};
use crate::parser::rules::{
    month_number, ParserRules, MIN_RECORD_TOKENS, PLACEHOLDER_NAME, YEAR_CEILING, YEAR_FLOOR,
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// `$` followed by digits, optionally grouped with commas.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([0-9,]*[0-9][0-9,]*)$").expect("price pattern is valid"));

/// Turns one token list into a record, or says why it can't.
pub fn structure_tokens(
    tokens: &[String],
    rules: &ParserRules,
) -> Result<ListingRecord, Rejection> {
    if tokens.len() < MIN_RECORD_TOKENS {
        return Err(Rejection::TooFewTokens {
            found: tokens.len(),
            min: MIN_RECORD_TOKENS,
        });
    }

    let price = parse_price(&tokens[0])?;

    let date_start = tokens.len() - 3;
    let date = parse_date(&tokens[date_start..])?;

    let name = build_name(&tokens[1..date_start], rules);

    Ok(ListingRecord::new(name, price, date))
}

pub fn parse_price(token: &str) -> Result<f64, Rejection> {
    let invalid = || Rejection::InvalidPrice {
        token: token.to_string(),
    };

    let body = PRICE_PATTERN
        .captures(token)
        .and_then(|caps| caps.get(1))
        .ok_or_else(invalid)?;

    let digits: String = body.as_str().chars().filter(|c| *c != ',').collect();
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    }
}

/// Reads a `Mon day year` triple such as `Jan 5, 2024`.
pub fn parse_date(triple: &[String]) -> Result<NaiveDate, Rejection> {
    let invalid = || Rejection::InvalidDate {
        tokens: triple.to_vec(),
    };

    let [month, day, year] = triple else {
        return Err(invalid());
    };

    let month = month.trim_matches(|c: char| c == '.' || c == ',');
    let month = month_number(month).ok_or_else(invalid)?;

    let day: u32 = day
        .replace(',', "")
        .trim_end_matches('.')
        .parse()
        .map_err(|_| invalid())?;

    let year: i32 = year.parse().map_err(|_| invalid())?;
    if year <= YEAR_FLOOR || year >= YEAR_CEILING {
        return Err(Rejection::YearOutOfRange {
            year,
            min: YEAR_FLOOR,
            max: YEAR_CEILING,
        });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn build_name(name_tokens: &[String], rules: &ParserRules) -> String {
    let name_tokens = match name_tokens.split_last() {
        Some((last, rest)) if rules.is_category_code(last) => rest,
        _ => name_tokens,
    };

    let name = name_tokens.join(" ");
    let name = name.trim();
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn structure(parts: &[&str]) -> Result<ListingRecord, Rejection> {
        structure_tokens(&tokens(parts), &ParserRules::default())
    }

    #[test]
    fn test_grouped_price_and_comma_day() {
        let record = structure(&["$1,234", "Widget", "Pro", "Jan", "5,", "2024"]).unwrap();
        assert_eq!(record.name(), "Widget Pro");
        assert_eq!(record.price(), 1234.0);
        assert_eq!(record.date_display(), "05/01/2024");
    }

    #[test]
    fn test_trailing_category_code_is_stripped() {
        let record = structure(&["$50", "Item", "GTL", "Feb", "1", "2024"]).unwrap();
        assert_eq!(record.name(), "Item");

        let record = structure(&["$50", "Big", "Item", "gm", "Feb", "1", "2024"]).unwrap();
        assert_eq!(record.name(), "Big Item");
    }

    #[test]
    fn test_category_code_only_stripped_from_end() {
        let record = structure(&["$50", "GTL", "Item", "Feb", "1", "2024"]).unwrap();
        assert_eq!(record.name(), "GTL Item");
    }

    #[test]
    fn test_missing_currency_marker_rejects() {
        assert_eq!(
            structure(&["50", "Item", "Feb", "1", "2024"]),
            Err(Rejection::InvalidPrice {
                token: "50".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_prices_reject() {
        for bad in ["$", "$,", "$12a", "$1.50", "€10", "$-5", "$ 5"] {
            assert!(
                matches!(parse_price(bad), Err(Rejection::InvalidPrice { .. })),
                "{bad} should be rejected"
            );
        }
        assert_eq!(parse_price("$1,000,000").unwrap(), 1_000_000.0);
        assert_eq!(parse_price("$0").unwrap(), 0.0);
    }

    #[test]
    fn test_year_outside_window_rejects() {
        for year in ["1899", "1990", "2100", "2101"] {
            let result = structure(&["$5", "Item", "Mar", "3", year]);
            assert!(
                matches!(result, Err(Rejection::YearOutOfRange { .. })),
                "{year} should be out of range"
            );
        }
        assert!(structure(&["$5", "Item", "Mar", "3", "1991"]).is_ok());
        assert!(structure(&["$5", "Item", "Mar", "3", "2099"]).is_ok());
    }

    #[test]
    fn test_too_few_tokens_rejects() {
        assert_eq!(
            structure(&["$5", "Jan", "2024"]),
            Err(Rejection::TooFewTokens { found: 3, min: 4 })
        );
    }

    #[test]
    fn test_empty_name_gets_placeholder() {
        let record = structure(&["$5", "Jan", "1", "2024"]).unwrap();
        assert_eq!(record.name(), PLACEHOLDER_NAME);

        let record = structure(&["$5", "GTL", "Jan", "1", "2024"]).unwrap();
        assert_eq!(record.name(), PLACEHOLDER_NAME);
    }

    #[test]
    fn test_month_punctuation_and_case() {
        let record = structure(&["$5", "Item", "feb.", "14", "2023"]).unwrap();
        assert_eq!(record.date_display(), "14/02/2023");

        let record = structure(&["$5", "Item", "DEC,", "31.", "2023"]).unwrap();
        assert_eq!(record.date_display(), "31/12/2023");
    }

    #[test]
    fn test_bad_date_parts_reject() {
        let cases: [&[&str]; 4] = [
            &["$5", "Item", "Foo", "1", "2024"],
            &["$5", "Item", "Jan", "x", "2024"],
            &["$5", "Item", "Jan", "1", "20x4"],
            &["$5", "Item", "Feb", "30", "2024"],
        ];
        for case in cases {
            assert!(
                matches!(structure(case), Err(Rejection::InvalidDate { .. })),
                "{case:?} should fail date parsing"
            );
        }
    }

    #[test]
    fn test_leap_day_is_valid() {
        let record = structure(&["$5", "Item", "Feb", "29", "2024"]).unwrap();
        assert_eq!(record.date_display(), "29/02/2024");
    }

    #[test]
    fn test_custom_category_codes() {
        let rules = ParserRules {
            category_codes: vec!["AH".to_string()],
            ..ParserRules::default()
        };
        let record =
            structure_tokens(&tokens(&["$5", "Ore", "AH", "Jan", "1", "2024"]), &rules).unwrap();
        assert_eq!(record.name(), "Ore");

        let record =
            structure_tokens(&tokens(&["$5", "Ore", "GTL", "Jan", "1", "2024"]), &rules).unwrap();
        assert_eq!(record.name(), "Ore GTL");
    }

    #[test]
    fn test_formatted_date_round_trips() {
        let record = structure(&["$5", "Item", "Jul", "9", "2021"]).unwrap();
        let reparsed = ListingRecord::parse_date_display(&record.date_display()).unwrap();
        assert_eq!(reparsed, record.date());
    }
}
