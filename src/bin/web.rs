//! Single binary web server: JSON API over one in-memory pairing session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use team_pairing::{
    advance, apply_optimal, back, classify, compare, recommend, rename, reset, select,
    solve_detailed, Method, PairingError, Session, Side, Slot, Step,
};

/// In-memory state: the one session the wizard works on.
type AppState = Data<RwLock<Session>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamNamesBody {
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    opponent_team_name: String,
}

#[derive(Deserialize)]
struct MethodBody {
    method: Method,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct RenameBody {
    side: Side,
    old_name: String,
    new_name: String,
}

#[derive(Deserialize)]
struct RatingBody {
    player: String,
    opponent: String,
    rating: i64,
}

#[derive(Deserialize)]
struct SolveQuery {
    method: Option<Method>,
}

/// Session as JSON on success, 400 with the error text otherwise.
fn session_response(session: &Session, result: Result<(), PairingError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(session),
        Err(e) => {
            log::warn!("Rejected request: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-pairing",
    })
}

/// Current session: rosters, ratings, picks, phase and final pairing.
#[get("/api/session")]
async fn api_get_session(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(&*g)
}

/// Clear all picks (rosters and ratings stay).
#[post("/api/session/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reset(&mut g);
    HttpResponse::Ok().json(&*g)
}

#[put("/api/session/teams")]
async fn api_set_team_names(state: AppState, body: Json<TeamNamesBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.set_team_names(&body.team_name, &body.opponent_team_name);
    HttpResponse::Ok().json(&*g)
}

/// Choose the solver behind recommendations.
#[put("/api/session/method")]
async fn api_set_method(state: AppState, body: Json<MethodBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.set_method(body.method);
    HttpResponse::Ok().json(&*g)
}

/// Add one of our players (Setup only).
#[post("/api/session/players")]
async fn api_add_player(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.add_player(body.name.as_str());
    session_response(&g, result)
}

/// Add an opponent (Setup only).
#[post("/api/session/opponents")]
async fn api_add_opponent(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.add_opponent(body.name.as_str());
    session_response(&g, result)
}

#[delete("/api/session/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<String>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.remove_player(&path);
    session_response(&g, result)
}

#[delete("/api/session/opponents/{name}")]
async fn api_remove_opponent(state: AppState, path: Path<String>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.remove_opponent(&path);
    session_response(&g, result)
}

/// Rename a player or opponent; ratings and picks follow the new name.
#[put("/api/session/rename")]
async fn api_rename(state: AppState, body: Json<RenameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = rename(&mut g, body.side, &body.old_name, &body.new_name);
    session_response(&g, result)
}

/// Set one rating (Setup only).
#[put("/api/session/ratings")]
async fn api_set_rating(state: AppState, body: Json<RatingBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.set_rating(&body.player, &body.opponent, body.rating);
    session_response(&g, result)
}

/// Record a pick for the current step.
#[put("/api/session/selection")]
async fn api_select(state: AppState, body: Json<Slot>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = select(&mut g, body.into_inner());
    session_response(&g, result)
}

#[post("/api/session/advance")]
async fn api_advance(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = advance(&mut g);
    session_response(&g, result)
}

#[post("/api/session/back")]
async fn api_back(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = back(&mut g);
    session_response(&g, result)
}

/// Recommendation for step 1..=6, computed from the current picks.
#[get("/api/session/recommendation/{step}")]
async fn api_recommendation(state: AppState, path: Path<u8>) -> HttpResponse {
    let step = match Step::try_from(path.into_inner()) {
        Ok(step) => step,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(recommend(&g, step))
}

/// Classified solver pairing over both full rosters (method defaults to the session's).
#[get("/api/session/solve")]
async fn api_solve(state: AppState, query: Query<SolveQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let method = query.method.unwrap_or(g.method);
    let players = g.players().names();
    let opponents = g.opponents().names();
    let mut solution = solve_detailed(players, opponents, g.ratings(), method);
    solution.pairs = classify(&solution.pairs);
    HttpResponse::Ok().json(solution)
}

#[get("/api/session/comparison")]
async fn api_comparison(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(compare(&g))
}

/// Replace the final pairing with the solver's (Completed only).
#[post("/api/session/apply-optimal")]
async fn api_apply_optimal(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = apply_optimal(&mut g);
    session_response(&g, result)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Session::default()));

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await
}

fn routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_session)
        .service(api_reset)
        .service(api_set_team_names)
        .service(api_set_method)
        .service(api_add_player)
        .service(api_add_opponent)
        .service(api_remove_player)
        .service(api_remove_opponent)
        .service(api_rename)
        .service(api_set_rating)
        .service(api_select)
        .service(api_advance)
        .service(api_back)
        .service(api_recommendation)
        .service(api_solve)
        .service(api_comparison)
        .service(api_apply_optimal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> AppState {
        Data::new(RwLock::new(Session::default()))
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(App::new().app_data(app_state()).configure(routes)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
    }

    #[actix_web::test]
    async fn out_of_range_rating_is_bad_request() {
        let state = app_state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(routes)).await;
        let req = test::TestRequest::put()
            .uri("/api/session/ratings")
            .set_json(serde_json::json!({ "player": "Player 1", "opponent": "Opponent 1", "rating": 9 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(state.read().unwrap().ratings().value("Player 1", "Opponent 1"), 3);
    }

    #[actix_web::test]
    async fn selection_and_recommendation_flow() {
        let state = app_state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(routes)).await;

        let req = test::TestRequest::post().uri("/api/session/advance").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::put()
            .uri("/api/session/selection")
            .set_json(serde_json::json!({ "slot": "defender", "value": "Player 1" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
        assert_eq!(
            state.read().unwrap().protocol().first.defender.as_deref(),
            Some("Player 1")
        );

        let req = test::TestRequest::get()
            .uri("/api/session/recommendation/1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body.get("defender").is_some());

        let req = test::TestRequest::get()
            .uri("/api/session/recommendation/9")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn duplicate_rename_is_reported() {
        let app = test::init_service(App::new().app_data(app_state()).configure(routes)).await;
        let req = test::TestRequest::put()
            .uri("/api/session/rename")
            .set_json(serde_json::json!({ "side": "team", "old_name": "Player 1", "new_name": "player 2" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("already exists"));
    }

    #[actix_web::test]
    async fn solve_returns_classified_pairs() {
        let app = test::init_service(App::new().app_data(app_state()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/session/solve?method=greedy")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["requested"], "greedy");
        assert_eq!(body["used"], "greedy");
        assert_eq!(body["total"], 15);

        let pairs = body["pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 5);
        let defenders = pairs.iter().filter(|p| p["role"] == "defender").count();
        assert_eq!(defenders, 2);
        assert!(pairs.iter().all(|p| p.get("role").is_some()));
    }
}
