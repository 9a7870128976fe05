//! Typed form inputs for every mutating endpoint, mapped field by field
//! instead of copying submitted data into models dynamically

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Form,
};
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct SearchSchema {
    /// An empty term is a substring of everything and matches every row
    #[serde(default)]
    #[validate(length(max = 120))]
    pub search_term: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct NewVenueSchema {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[validate(length(min = 1, max = 120))]
    pub address: String,
    #[validate(length(min = 1, max = 120))]
    pub phone: String,
    #[validate(length(min = 1, max = 500))]
    pub facebook_link: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct EditVenueSchema {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[validate(length(min = 1, max = 120))]
    pub address: String,
    #[validate(length(min = 1, max = 120))]
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Checkbox, present when ticked
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct NewArtistSchema {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[validate(length(min = 1, max = 120))]
    pub phone: String,
    /// Comma-separated genre list, e.g. "Jazz, Funk"
    #[validate(length(min = 1, max = 500))]
    pub genres: String,
    #[validate(length(min = 1, max = 500))]
    pub image_link: String,
    #[validate(length(min = 1, max = 500))]
    pub facebook_link: String,
    #[validate(length(min = 1, max = 500))]
    pub website_link: String,
    /// Checkbox, present when ticked
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct EditArtistSchema {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[validate(length(min = 1, max = 120))]
    pub phone: String,
    /// Comma-separated genre list, e.g. "Jazz, Funk"
    #[validate(length(min = 1, max = 500))]
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// Checkbox, present when ticked
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
pub struct NewShowSchema {
    pub artist_id: i64,
    pub venue_id: i64,
    /// `YYYY-MM-DD HH:MM:SS`
    #[validate(length(min = 1, max = 32))]
    pub start_time: String,
}

/// Splits the comma-separated genres form field into the ordered list the
/// domain works with
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(String::from)
        .collect()
}

pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted_form: Form<T> = Form::from_request(req, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Form parse failed"))?;

        extracted_form
            .0
            .validate()
            .map_err(|_| (StatusCode::BAD_REQUEST, "Request body is invalid"))?;

        Ok(Self(extracted_form.0))
    }
}

#[cfg(test)]
mod test {
    use super::split_genres;

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres("Jazz"), vec!["Jazz".to_string()]);
        assert_eq!(
            split_genres("Jazz, Funk ,Soul"),
            vec!["Jazz".to_string(), "Funk".to_string(), "Soul".to_string()]
        );
        assert_eq!(split_genres(""), Vec::<String>::new());
        assert_eq!(split_genres(" , "), Vec::<String>::new());
    }
}
