//! Icon name listing and the icon files themselves.
//!
//! ```text
//! GET /api/icons
//! GET /icons/{file}
//! ```

use std::path::PathBuf;

use actix_files::Files;
use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{get, web};

use crate::inbound::http::state::HttpState;

/// Mount point of the icon files.
pub const ICON_FILES_PATH: &str = "/icons";

/// Icons are cacheable by clients for one day.
pub const ICON_CACHE_CONTROL: &str = "public, max-age=86400";

/// Known icon file names, sorted.
#[utoipa::path(
    get,
    path = "/api/icons",
    responses(
        (status = 200, description = "Icon file names", body = [String])
    ),
    tags = ["icons"],
    operation_id = "listIcons"
)]
#[get("/icons")]
pub async fn list_icons(state: web::Data<HttpState>) -> web::Json<Vec<String>> {
    web::Json(state.icons.names().map(str::to_owned).collect())
}

/// Serve the files in `dir` under [`ICON_FILES_PATH`].
///
/// Directory listings stay disabled; unknown files answer 404.
pub fn icon_files(dir: impl Into<PathBuf>) -> impl HttpServiceFactory {
    web::scope(ICON_FILES_PATH)
        .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, ICON_CACHE_CONTROL)))
        .service(Files::new("", dir.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use cap_std::{ambient_authority, fs::Dir};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::catalogue::IconCatalogue;
    use crate::outbound::memory::InMemoryDocumentStore;

    #[rstest]
    #[actix_web::test]
    async fn icons_are_listed_in_name_order() {
        let state = HttpState::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(IconCatalogue::from_names(["milk.png", "bread.png"])),
        );
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api").service(list_icons)),
        )
        .await;
        let request = actix_test::TestRequest::get().uri("/api/icons").to_request();
        let names: Vec<String> = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(names, ["bread.png", "milk.png"]);
    }

    #[rstest]
    #[case("/icons/milk.png", StatusCode::OK)]
    #[case("/icons/butter.png", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn icon_files_are_served_from_the_directory(
        #[case] uri: &str,
        #[case] status: StatusCode,
    ) {
        let temp = tempfile::tempdir().expect("tempdir");
        Dir::open_ambient_dir(temp.path(), ambient_authority())
            .expect("open")
            .write("milk.png", b"png")
            .expect("write icon");
        let app = actix_test::init_service(App::new().service(icon_files(temp.path().to_path_buf()))).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), status);
    }
}
