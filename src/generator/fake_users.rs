use chrono::NaiveDate;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::job::en::Title;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

use crate::domain::record::Record;

/// Field set of a generated user record, in column order.
pub const USER_FIELDS: [&str; 7] = [
    "name",
    "address",
    "email",
    "phone_number",
    "birth_date",
    "company",
    "job",
];

const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

fn fake_birth_date() -> String {
    let mut rng = rand::thread_rng();
    let year = rng.gen_range(1940..=2005);
    let month = rng.gen_range(1..=12);
    // Capped at 28 so any month/year combination stays valid
    let day = rng.gen_range(1..=28);

    NaiveDate::from_ymd_opt(year, month, day)
        .expect("day <= 28 is valid in every month")
        .format(BIRTH_DATE_FORMAT)
        .to_string()
}

fn fake_address() -> String {
    format!(
        "{} {}, {} {}",
        BuildingNumber().fake::<String>(),
        StreetName().fake::<String>(),
        CityName().fake::<String>(),
        ZipCode().fake::<String>(),
    )
}

/// One synthetic person record with the fixed [`USER_FIELDS`] key set.
pub fn fake_user() -> Record {
    let mut record = Record::new();
    record.insert("name", Name().fake::<String>());
    record.insert("address", fake_address());
    record.insert("email", FreeEmail().fake::<String>());
    record.insert("phone_number", PhoneNumber().fake::<String>());
    record.insert("birth_date", fake_birth_date());
    record.insert("company", CompanyName().fake::<String>());
    record.insert("job", Title().fake::<String>());
    record
}

/// Exactly `count` independently generated records. `count` is unsigned, so
/// a negative count is unrepresentable.
pub fn fake_users(count: usize) -> Vec<Record> {
    (0..count).map(|_| fake_user()).collect()
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn test_fake_users_count() {
        assert_eq!(fake_users(5).len(), 5);
        assert!(fake_users(0).is_empty());
    }

    #[test]
    fn test_fake_user_has_all_fields_in_order() {
        let user = fake_user();
        let keys: Vec<&str> = user.keys().collect();
        assert_eq!(keys, USER_FIELDS);
    }

    #[test]
    fn test_fake_user_fields_are_non_empty() {
        let user = fake_user();
        for field in USER_FIELDS {
            assert!(
                !user.get(field).unwrap().is_empty(),
                "field {} should not be empty",
                field
            );
        }
    }

    #[test]
    fn test_birth_date_format() {
        let pattern = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap();
        for user in fake_users(20) {
            let birth_date = user.get("birth_date").unwrap();
            assert!(
                pattern.is_match(birth_date),
                "birth_date {} should match DD.MM.YYYY",
                birth_date
            );
        }
    }

    #[test]
    fn test_fake_users_batch_is_uniform() {
        let users = fake_users(3);
        let header = crate::domain::record::batch_header(&users).unwrap();
        assert_eq!(header, USER_FIELDS);
    }
}
