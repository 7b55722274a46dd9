use crate::domain::model::Listing;
use crate::utils::error::Result;
use std::path::Path;

pub fn read_listings<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    collect_listings(reader)
}

pub fn parse_listings(data: &[u8]) -> Result<Vec<Listing>> {
    collect_listings(csv::Reader::from_reader(data))
}

fn collect_listings<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();
    for row in reader.deserialize() {
        let listing: Listing = row?;
        listings.push(listing);
    }
    Ok(listings)
}

pub fn listings_to_csv(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::utils::error::RentError::IoError(e.into_error()))
}

pub fn write_listings<P: AsRef<Path>>(path: P, listings: &[Listing]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, listings_to_csv(listings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_columns_are_ignored() {
        let data = b"bedrooms,bathrooms,squareft,property_type,postcode_area,price,url\n\
2.0,1.0,700,Flat,OX1,1650,https://example.com/1\n";
        let listings = parse_listings(data).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].bedrooms, 2.0);
        assert_eq!(listings[0].postcode_area, "OX1");
    }

    #[test]
    fn test_missing_categorical_columns_default_to_empty() {
        let data = b"bedrooms,bathrooms,squareft,price\n1,1,400,900\n";
        let listings = parse_listings(data).unwrap();
        assert_eq!(listings[0].property_type, "");
        assert_eq!(listings[0].price, 900.0);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data").join("oxford_rentals_cleaned.csv");
        let listings = parse_listings(b"bedrooms,bathrooms,squareft,property_type,postcode_area,price\n3,2,1100,House,OX2,2300\n").unwrap();
        write_listings(&path, &listings).unwrap();
        assert_eq!(read_listings(&path).unwrap(), listings);
    }
}
