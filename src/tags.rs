//! Popularity tags for well-known cities, shown in live discovery mode

/// City keyword to tags, in lookup order. Keys are lower-case.
static CITY_POPULAR: &[(&str, &[&str])] = &[
    ("mumbai", &["Vada Pav", "Pav Bhaji", "Marine Drive", "Bollywood"]),
    ("delhi", &["Chole Bhature", "Paranthas", "Street Food", "Monuments"]),
    ("jaipur", &["Ghewar", "Dal Baati", "Handicrafts", "Pink City"]),
    ("hyderabad", &["Biryani", "Irani Chai", "Pearls"]),
    ("kolkata", &["Rosogolla", "Misti Doi", "Trams", "Literature"]),
    ("agra", &["Petha", "Marble Handicrafts", "Mughlai"]),
];

/// Tags for the first keyword contained in the lower-cased city name.
///
/// Substring, not prefix: "New Delhi Area" matches `delhi`.
#[must_use]
pub fn tags_for_city(city: Option<&str>) -> &'static [&'static str] {
    let Some(city) = city else {
        return &[];
    };
    let key = city.to_lowercase();

    CITY_POPULAR
        .iter()
        .find(|(keyword, _)| key.contains(*keyword))
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}

/// Owned copy of [`tags_for_city`] for serialized responses
#[must_use]
pub fn owned_tags_for_city(city: Option<&str>) -> Vec<String> {
    tags_for_city(city).iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("New Delhi"), vec!["Chole Bhature", "Paranthas", "Street Food", "Monuments"])]
    #[case(Some("New Delhi Area"), vec!["Chole Bhature", "Paranthas", "Street Food", "Monuments"])]
    #[case(Some("AGRA"), vec!["Petha", "Marble Handicrafts", "Mughlai"])]
    #[case(Some("Unknown Town"), vec![])]
    #[case(Some(""), vec![])]
    #[case(None, vec![])]
    fn test_tags_for_city(#[case] city: Option<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(tags_for_city(city), expected.as_slice());
    }

    #[test]
    fn test_first_declared_key_wins() {
        // Contains both "mumbai" and "delhi"; mumbai is declared first.
        assert_eq!(tags_for_city(Some("Delhi-Mumbai Corridor"))[0], "Vada Pav");
    }

    #[test]
    fn test_owned_tags() {
        assert_eq!(
            owned_tags_for_city(Some("Hyderabad")),
            vec!["Biryani", "Irani Chai", "Pearls"]
        );
    }
}
