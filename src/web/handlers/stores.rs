//! Listing, tag and ranking pages, plus the signed-in forms for adding
//! listings and reviews.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::services::StoreInput;
use crate::domain::entities::{Account, Location, NearbyStore, Review, Store, StoreWithReviews};
use crate::domain::reports::{DEFAULT_TOP_LIMIT, RatingSummary, TagCount};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::current_user::CurrentUser;
use crate::web::flash::{Flash, IncomingFlash, redirect_with_flash};

/// Listings shown per page on `/stores`.
const STORES_PER_PAGE: i64 = 6;

/// Paginated listing grid.
#[derive(Template, WebTemplate)]
#[template(path = "stores.html")]
pub struct StoresTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub stores: Vec<StoreWithReviews>,
    pub page: i64,
    pub page_count: i64,
    pub total: i64,
}

/// A single listing with its reviews.
#[derive(Template, WebTemplate)]
#[template(path = "store.html")]
pub struct StoreTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub store: Store,
    pub reviews: Vec<Review>,
    pub average_rating: Option<String>,
    pub hearted: bool,
}

/// Tag cloud with the listings for the selected tag, if any.
#[derive(Template, WebTemplate)]
#[template(path = "tags.html")]
pub struct TagsTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub tags: Vec<TagLink>,
    pub active: Option<String>,
    pub stores: Vec<Store>,
}

/// One entry of the tag cloud.
pub struct TagLink {
    pub tag: String,
    pub count: i64,
    pub active: bool,
}

impl TagLink {
    fn from_counts(counts: Vec<TagCount>, active: Option<&str>) -> Vec<Self> {
        counts
            .into_iter()
            .map(|c| Self {
                active: active == Some(c.tag.as_str()),
                tag: c.tag,
                count: c.count,
            })
            .collect()
    }
}

/// Top-rated listings.
#[derive(Template, WebTemplate)]
#[template(path = "top.html")]
pub struct TopTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub stores: Vec<RatingSummary>,
}

/// Listings near a point, with the form to pick another point.
#[derive(Template, WebTemplate)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub lng: String,
    pub lat: String,
    pub stores: Vec<NearbyLink>,
}

/// One row of the nearby list.
pub struct NearbyLink {
    pub name: String,
    pub path: String,
    pub address: String,
    pub distance: String,
}

impl From<NearbyStore> for NearbyLink {
    fn from(nearby: NearbyStore) -> Self {
        Self {
            path: store_path(&nearby.store.slug),
            name: nearby.store.name,
            address: nearby.store.location.address,
            distance: format!("{:.1} km", nearby.distance_m / 1000.0),
        }
    }
}

/// Listings the signed-in account hearts.
#[derive(Template, WebTemplate)]
#[template(path = "hearts.html")]
pub struct HeartsTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub stores: Vec<Store>,
}

#[derive(Template, WebTemplate)]
#[template(path = "add_store.html")]
pub struct AddStoreTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
}

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Point searched by `/map`. Raw text so a typo renders the page with an error.
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub lng: Option<String>,
    pub lat: Option<String>,
}

/// Point the map page searches around when none is given.
const DEFAULT_MAP_POINT: (f64, f64) = (-79.8, 43.2);

/// Fields of the add-listing form. Coordinates and tags arrive as raw text.
#[derive(Debug, Deserialize)]
pub struct StoreForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    pub address: String,
    pub longitude: String,
    pub latitude: String,
    #[serde(default)]
    pub photo: String,
}

#[derive(Debug, Deserialize)]
pub struct HeartForm {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub slug: String,
    pub text: String,
    pub rating: String,
}

fn error_page(user: Option<Account>, e: AppError) -> Response {
    match e {
        AppError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                title: "Not Found".to_string(),
                user,
                flash: None,
            },
        )
            .into_response(),
        other => other.into_response(),
    }
}

/// Renders one page of listings, newest first.
///
/// A page past the end redirects to the last page.
///
/// # Endpoint
///
/// `GET /` and `GET /stores?page=N`
pub async fn stores_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);

    let listing = match state.store_service.list_stores(page, STORES_PER_PAGE).await {
        Ok(listing) => listing,
        Err(e) => return error_page(user, e),
    };

    let page_count = listing.page_count();
    if page > page_count {
        return redirect_with_flash(
            &format!("/stores?page={page_count}"),
            Flash::info(format!(
                "Hey! You asked for page {page}. But that doesn't exist. So I put you on page {page_count}"
            )),
        );
    }

    flash.render(StoresTemplate {
        title: "Stores".to_string(),
        user,
        flash: flash.0.clone(),
        stores: listing.stores,
        page,
        page_count,
        total: listing.total,
    })
}

/// Renders a listing by slug, or the not-found page.
///
/// # Endpoint
///
/// `GET /store/{slug}`
pub async fn store_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    let found = match state.store_service.get_store_by_slug(&slug).await {
        Ok(found) => found,
        Err(e) => return error_page(user, e),
    };

    let hearted = match &user {
        Some(account) => state
            .store_service
            .hearted_store_ids(account)
            .await
            .map(|ids| ids.contains(&found.store.id)),
        None => Ok(false),
    };
    let hearted = match hearted {
        Ok(hearted) => hearted,
        Err(e) => return error_page(user, e),
    };

    let average_rating = found.average_rating().map(|avg| format!("{avg:.1}"));
    flash.render(StoreTemplate {
        title: found.store.name.clone(),
        user,
        flash: flash.0.clone(),
        store: found.store,
        reviews: found.reviews,
        average_rating,
        hearted,
    })
}

/// Renders the listings nearest a point.
///
/// # Endpoint
///
/// `GET /map?lng=-79.38&lat=43.65`
pub async fn map_page(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    let lng = query
        .lng
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| DEFAULT_MAP_POINT.0.to_string());
    let lat = query
        .lat
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| DEFAULT_MAP_POINT.1.to_string());

    let (stores, error) = match (lng.parse::<f64>(), lat.parse::<f64>()) {
        (Ok(longitude), Ok(latitude)) => {
            match state.store_service.stores_near(longitude, latitude).await {
                Ok(found) => (found.into_iter().map(NearbyLink::from).collect(), None),
                Err(e @ AppError::Validation { .. }) => (Vec::new(), Some(Flash::from(&e))),
                Err(e) => return error_page(user, e),
            }
        }
        _ => (
            Vec::new(),
            Some(Flash::error("Longitude and latitude must be numbers")),
        ),
    };

    flash.render(MapTemplate {
        title: "Map".to_string(),
        user,
        flash: error.or_else(|| flash.0.clone()),
        lng,
        lat,
        stores,
    })
}

async fn render_tags(
    state: &AppState,
    active: Option<String>,
    user: Option<Account>,
    flash: IncomingFlash,
) -> Response {
    let tags = match state.store_service.tag_counts().await {
        Ok(tags) => tags,
        Err(e) => return error_page(user, e),
    };

    let stores = match &active {
        Some(tag) => match state.store_service.stores_by_tag(tag).await {
            Ok(stores) => stores,
            Err(e) => return error_page(user, e),
        },
        None => Vec::new(),
    };

    flash.render(TagsTemplate {
        title: active.clone().unwrap_or_else(|| "Tags".to_string()),
        user,
        flash: flash.0.clone(),
        tags: TagLink::from_counts(tags, active.as_deref()),
        active,
        stores,
    })
}

/// Renders the tag cloud.
///
/// # Endpoint
///
/// `GET /tags`
pub async fn tags_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    render_tags(&state, None, user, flash).await
}

/// Renders the tag cloud with the listings carrying `tag`.
///
/// # Endpoint
///
/// `GET /tags/{tag}`
pub async fn tag_page(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    render_tags(&state, Some(tag), user, flash).await
}

/// Renders the top-rated listings.
///
/// # Endpoint
///
/// `GET /top`
pub async fn top_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    match state.store_service.top_rated_stores(DEFAULT_TOP_LIMIT).await {
        Ok(stores) => flash.render(TopTemplate {
            title: "Top Stores!".to_string(),
            user,
            flash: flash.0.clone(),
            stores,
        }),
        Err(e) => error_page(user, e),
    }
}

/// Renders the add-listing form.
///
/// # Endpoint
///
/// `GET /add` (signed in)
pub async fn add_store_page(
    Extension(account): Extension<Account>,
    flash: IncomingFlash,
) -> Response {
    flash.render(AddStoreTemplate {
        title: "Add Store".to_string(),
        user: Some(account),
        flash: flash.0.clone(),
    })
}

impl StoreForm {
    fn into_input(self) -> Result<StoreInput, Flash> {
        let longitude = self
            .longitude
            .trim()
            .parse::<f64>()
            .map_err(|_| Flash::error("You must supply a longitude!"))?;
        let latitude = self
            .latitude
            .trim()
            .parse::<f64>()
            .map_err(|_| Flash::error("You must supply a latitude!"))?;

        let tags = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let photo = Some(self.photo.trim().to_string()).filter(|p| !p.is_empty());

        Ok(StoreInput {
            name: self.name,
            description: self.description,
            tags,
            location: Location {
                longitude,
                latitude,
                address: self.address,
            },
            photo,
        })
    }
}

/// Creates a listing and shows it.
///
/// # Endpoint
///
/// `POST /add` (signed in)
pub async fn add_store_submit(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Form(form): Form<StoreForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(flash) => return redirect_with_flash("/add", flash),
    };

    match state.store_service.create_store(&account, input).await {
        Ok(store) => redirect_with_flash(
            &store_path(&store.slug),
            Flash::success(format!(
                "Successfully created {}. Care to leave a review?",
                store.name
            )),
        ),
        Err(e) => redirect_with_flash("/add", Flash::from(&e)),
    }
}

/// Page path for `slug`, percent-encoded so non-ASCII slugs fit in a `Location` header.
fn store_path(slug: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    format!("/store/{encoded}")
}

/// Slugs are lowercase letters, digits and hyphens. Letters may be non-ASCII.
fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| (c.is_alphanumeric() && !c.is_uppercase()) || c == '-')
}

/// Adds a review and returns to the listing page.
///
/// # Endpoint
///
/// `POST /reviews/{id}` (signed in)
pub async fn review_submit(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(store_id): Path<i64>,
    Form(form): Form<ReviewForm>,
) -> Response {
    let back = if is_slug(&form.slug) {
        store_path(&form.slug)
    } else {
        "/stores".to_string()
    };

    let Ok(rating) = form.rating.trim().parse::<i16>() else {
        return redirect_with_flash(&back, Flash::error("Rating must be between 1 and 5"));
    };

    match state
        .store_service
        .add_review(&account, store_id, &form.text, rating)
        .await
    {
        Ok(_) => redirect_with_flash(&back, Flash::success("Review Saved!")),
        Err(e) => redirect_with_flash(&back, Flash::from(&e)),
    }
}

/// Renders the listings the account hearts.
///
/// # Endpoint
///
/// `GET /hearts` (signed in)
pub async fn hearts_page(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    flash: IncomingFlash,
) -> Response {
    match state.store_service.hearted_stores(&account).await {
        Ok(stores) => flash.render(HeartsTemplate {
            title: "Hearted Stores".to_string(),
            user: Some(account),
            flash: flash.0.clone(),
            stores,
        }),
        Err(e) => error_page(Some(account), e),
    }
}

/// Hearts or un-hearts a listing and returns to its page.
///
/// # Endpoint
///
/// `POST /hearts/{id}` (signed in)
pub async fn heart_submit(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(store_id): Path<i64>,
    Form(form): Form<HeartForm>,
) -> Response {
    let back = if is_slug(&form.slug) {
        store_path(&form.slug)
    } else {
        "/hearts".to_string()
    };

    match state.store_service.toggle_heart(&account, store_id).await {
        Ok(heart) if heart.hearted => redirect_with_flash(&back, Flash::success("Hearted!")),
        Ok(_) => redirect_with_flash(&back, Flash::info("Heart removed.")),
        Err(e) => redirect_with_flash(&back, Flash::from(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockAccountRepository, MockReviewRepository, MockSessionRepository, MockStoreRepository,
    };
    use crate::infrastructure::mail::MockMailer;
    use axum::{
        Router,
        http::header,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use chrono::Utc;

    fn store(id: i64, slug: &str) -> Store {
        Store {
            id,
            name: "Bakery".to_string(),
            slug: slug.to_string(),
            description: "Bread".to_string(),
            tags: vec!["Family Friendly".to_string()],
            location: Location {
                longitude: 1.0,
                latitude: 2.0,
                address: "1 Main St".to_string(),
            },
            photo: None,
            author_id: 1,
            created_at: Utc::now(),
        }
    }

    fn review(store_id: i64, rating: i16) -> Review {
        Review {
            id: 1,
            store_id,
            author_id: 1,
            text: "Great".to_string(),
            rating,
            created_at: Utc::now(),
        }
    }

    fn server(stores: MockStoreRepository, reviews: MockReviewRepository) -> TestServer {
        let state = AppState::with_mocks(
            MockAccountRepository::new(),
            MockSessionRepository::new(),
            stores,
            reviews,
            MockMailer::new(),
        );
        let app = Router::new()
            .route("/stores", get(stores_page))
            .route("/store/{slug}", get(store_page))
            .route("/map", get(map_page))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_store_page_shows_average() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_slug()
            .returning(|slug| Ok(Some(store(4, slug))));

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_list_for_stores()
            .returning(|ids| Ok(vec![review(ids[0], 4), review(ids[0], 5)]));

        let response = server(stores, reviews).get("/store/bakery").await;

        response.assert_status_ok();
        response.assert_text_contains("Bakery");
        response.assert_text_contains("4.5");
    }

    #[tokio::test]
    async fn test_store_page_unknown_slug_is_404() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_slug().returning(|_| Ok(None));

        let response = server(stores, MockReviewRepository::new())
            .get("/store/nope")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_page_past_end_redirects_to_last_page() {
        let mut stores = MockStoreRepository::new();
        stores.expect_list().returning(|_, _| Ok(Vec::new()));
        stores.expect_count().returning(|| Ok(7));

        let response = server(stores, MockReviewRepository::new())
            .get("/stores?page=9")
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/stores?page=2");
    }

    #[tokio::test]
    async fn test_largest_page_number_redirects_to_last_page() {
        let mut stores = MockStoreRepository::new();
        stores.expect_list().returning(|_, _| Ok(Vec::new()));
        stores.expect_count().returning(|| Ok(7));

        let response = server(stores, MockReviewRepository::new())
            .get(&format!("/stores?page={}", i64::MAX))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/stores?page=2");
    }

    #[tokio::test]
    async fn test_map_lists_nearby_stores_with_distance() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_near()
            .withf(|lng, lat, _, _| *lng == -79.38 && *lat == 43.65)
            .returning(|_, _, _, _| {
                Ok(vec![NearbyStore {
                    store: store(3, "bakery"),
                    distance_m: 1530.0,
                }])
            });

        let response = server(stores, MockReviewRepository::new())
            .get("/map?lng=-79.38&lat=43.65")
            .await;

        response.assert_status_ok();
        response.assert_text_contains("/store/bakery");
        response.assert_text_contains("1.5 km");
    }

    #[tokio::test]
    async fn test_map_with_garbage_point_shows_error() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_near().times(0);

        let response = server(stores, MockReviewRepository::new())
            .get("/map?lng=west&lat=43.65")
            .await;

        response.assert_status_ok();
        response.assert_text_contains("Longitude and latitude must be numbers");
    }

    #[test]
    fn test_store_form_parses_tags_and_coordinates() {
        let form = StoreForm {
            name: "Bakery".to_string(),
            description: String::new(),
            tags: " Wifi, ,Open Late ".to_string(),
            address: "1 Main St".to_string(),
            longitude: "-79.4".to_string(),
            latitude: "43.6".to_string(),
            photo: "  ".to_string(),
        };

        let input = form.into_input().unwrap();

        assert_eq!(input.tags, vec!["Wifi", "Open Late"]);
        assert_eq!(input.location.longitude, -79.4);
        assert_eq!(input.photo, None);
    }

    #[test]
    fn test_store_form_rejects_missing_coordinates() {
        let form = StoreForm {
            name: "Bakery".to_string(),
            description: String::new(),
            tags: String::new(),
            address: "1 Main St".to_string(),
            longitude: String::new(),
            latitude: "43.6".to_string(),
            photo: String::new(),
        };

        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_tag_links_mark_active_tag() {
        let counts = vec![
            TagCount {
                tag: "Wifi".to_string(),
                count: 3,
            },
            TagCount {
                tag: "Vegan".to_string(),
                count: 1,
            },
        ];

        let links = TagLink::from_counts(counts, Some("Vegan"));

        assert!(!links[0].active);
        assert!(links[1].active);
    }

    #[tokio::test]
    async fn test_review_of_unicode_slug_returns_to_store() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_id()
            .returning(|id| Ok(Some(store(id, "café-noir"))));

        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().times(1).returning(|new| {
            Ok(Review {
                id: 1,
                store_id: new.store_id,
                author_id: new.author_id,
                text: new.text,
                rating: new.rating,
                created_at: Utc::now(),
            })
        });

        let state = AppState::with_mocks(
            MockAccountRepository::new(),
            MockSessionRepository::new(),
            stores,
            reviews,
            MockMailer::new(),
        );
        let reviewer = Account::new(
            2,
            "Ana".to_string(),
            "ana@example.com".to_string(),
            "$argon2id$stub".to_string(),
            None,
            Utc::now(),
        );
        let app = Router::new()
            .route("/reviews/{id}", post(review_submit))
            .layer(Extension(reviewer))
            .with_state(state);

        let response = TestServer::new(app)
            .unwrap()
            .post("/reviews/4")
            .form(&[("slug", "café-noir"), ("text", "Strong"), ("rating", "5")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/store/caf%C3%A9-noir");
    }

    fn signed_in(stores: MockStoreRepository) -> TestServer {
        let state = AppState::with_mocks(
            MockAccountRepository::new(),
            MockSessionRepository::new(),
            stores,
            MockReviewRepository::new(),
            MockMailer::new(),
        );
        let reader = Account::new(
            2,
            "Ana".to_string(),
            "ana@example.com".to_string(),
            "$argon2id$stub".to_string(),
            None,
            Utc::now(),
        );
        let app = Router::new()
            .route("/hearts", get(hearts_page))
            .route("/hearts/{id}", post(heart_submit))
            .route("/store/{slug}", get(store_page))
            .layer(Extension(reader))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_heart_submit_returns_to_store() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_id()
            .returning(|id| Ok(Some(store(id, "bakery"))));
        stores
            .expect_toggle_heart()
            .withf(|account_id, store_id| *account_id == 2 && *store_id == 4)
            .times(1)
            .returning(|_, _| Ok(true));
        stores.expect_hearted_ids().returning(|_| Ok(vec![4]));

        let response = signed_in(stores)
            .post("/hearts/4")
            .form(&[("slug", "bakery")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/store/bakery");
    }

    #[tokio::test]
    async fn test_hearts_page_lists_hearted_stores() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_list_hearted()
            .withf(|account_id| *account_id == 2)
            .returning(|_| Ok(vec![store(4, "corner-bakery")]));

        let response = signed_in(stores).get("/hearts").await;

        response.assert_status_ok();
        response.assert_text_contains("/store/corner-bakery");
    }

    #[test]
    fn test_store_path_encodes_non_ascii() {
        assert_eq!(store_path("coffee-and-co-2"), "/store/coffee-and-co-2");
        assert_eq!(store_path("café-noir"), "/store/caf%C3%A9-noir");
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("coffee-and-co-2"));
        assert!(is_slug("café-noir"));
        assert!(is_slug(&crate::utils::slug::derive_slug("Café Noir")));
        assert!(!is_slug("Café"));
        assert!(!is_slug("Coffee"));
        assert!(!is_slug("a/b"));
        assert!(!is_slug(""));
    }
}
