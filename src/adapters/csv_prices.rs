//! CSV end-of-day price file loader.
//!
//! Expects a header row followed by `symbol,close` records. Symbols are
//! uppercased on the way in so they line up with normalized tickers.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::error::TradefloorError;

pub fn load_price_file(path: &Path) -> Result<HashMap<String, f64>, TradefloorError> {
    let file_err = |reason: String| TradefloorError::PriceFile {
        file: path.display().to_string(),
        reason,
    };

    let mut rdr = csv::Reader::from_path(path).map_err(|e| file_err(e.to_string()))?;

    let mut prices = HashMap::new();
    for result in rdr.records() {
        let record = result.map_err(|e| file_err(format!("CSV parse error: {e}")))?;

        let symbol = record
            .get(0)
            .ok_or_else(|| file_err("missing symbol column".into()))?
            .trim();
        if symbol.is_empty() {
            return Err(file_err("empty symbol".into()));
        }

        let close: f64 = record
            .get(1)
            .ok_or_else(|| file_err("missing close column".into()))?
            .trim()
            .parse()
            .map_err(|e| file_err(format!("invalid close value for {symbol}: {e}")))?;

        prices.insert(symbol.to_uppercase(), close);
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_symbol_close_pairs() {
        let file = write_temp_csv("symbol,close\nAAPL,187.5\nmsft,410.25\n");
        let prices = load_price_file(file.path()).unwrap();

        assert_eq!(prices.len(), 2);
        assert!((prices["AAPL"] - 187.5).abs() < f64::EPSILON);
        // lowercased input uppercased on load
        assert!((prices["MSFT"] - 410.25).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unparseable_close() {
        let file = write_temp_csv("symbol,close\nAAPL,abc\n");
        let err = load_price_file(file.path()).unwrap_err();
        match err {
            TradefloorError::PriceFile { reason, .. } => {
                assert!(reason.contains("AAPL"));
            }
            other => panic!("expected PriceFile, got: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_price_file(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, TradefloorError::PriceFile { .. }));
    }

    #[test]
    fn empty_file_yields_empty_map() {
        let file = write_temp_csv("symbol,close\n");
        let prices = load_price_file(file.path()).unwrap();
        assert!(prices.is_empty());
    }
}
