use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct OrganizationDoc {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct EntrepreneurDoc {
    pub inn: String,
    pub ogrnip: String,
    pub phone: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct RegisterRequestDoc {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub organization: Option<OrganizationDoc>,
    pub entrepreneur: Option<EntrepreneurDoc>,
}

#[derive(utoipa::ToSchema)]
pub struct LoginFormDoc {
    /// Owner email.
    pub username: String,
    pub password: String,
}

#[derive(utoipa::ToSchema)]
pub struct ListingDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub organization_id: Option<i64>,
    pub entrepreneur_id: Option<i64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::metrics_text,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::refresh,
        crate::routes::auth::logout,
        crate::routes::owners::me,
        crate::routes::owners::update_me,
        crate::routes::owners::delete_me,
        crate::routes::organizations::create,
        crate::routes::organizations::list,
        crate::routes::organizations::mine,
        crate::routes::organizations::get,
        crate::routes::organizations::update,
        crate::routes::organizations::delete,
        crate::routes::entrepreneurs::create,
        crate::routes::entrepreneurs::list,
        crate::routes::entrepreneurs::get,
        crate::routes::entrepreneurs::update,
        crate::routes::entrepreneurs::delete,
        crate::routes::catalog::service_categories,
        crate::routes::catalog::product_categories,
        crate::routes::catalog::create_service,
        crate::routes::catalog::create_product,
        crate::routes::catalog::organization_services,
        crate::routes::catalog::organization_products,
        crate::routes::catalog::entrepreneur_services,
        crate::routes::catalog::entrepreneur_products,
        crate::routes::suggest::address,
        crate::routes::memes::list,
        crate::routes::memes::get,
        crate::routes::memes::create,
        crate::routes::memes::update,
        crate::routes::memes::delete,
        crate::routes::memes::download,
    ),
    components(
        schemas(
            HealthResponse,
            OrganizationDoc,
            EntrepreneurDoc,
            RegisterRequestDoc,
            LoginFormDoc,
            ListingDoc,
        )
    ),
    tags(
        (name = "ops"),
        (name = "auth"),
        (name = "owners"),
        (name = "organizations"),
        (name = "entrepreneurs"),
        (name = "catalog"),
        (name = "suggest"),
        (name = "memes")
    )
)]
pub struct ApiDoc;
