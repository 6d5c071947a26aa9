//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use padel_league_web::{
    aggregate, schedule_game_day, summarize, top_players, Competition, CompetitionError,
    CompetitionId, CompetitionStatus, GameDayId, MatchId, Player, PlayerId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory state: the global player directory plus all competitions by id.
/// The write lock serializes roster edits against schedule generation for
/// the same game day.
struct AppState {
    players: HashMap<PlayerId, Player>,
    competitions: HashMap<CompetitionId, Competition>,
}

type SharedState = Data<RwLock<AppState>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    birth_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct UpdatePlayerBody {
    name: String,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    birth_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct CreateCompetitionBody {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct EditCompetitionBody {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: CompetitionStatus,
}

#[derive(Deserialize)]
struct CompetitionSearchQuery {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Deserialize)]
struct CreateGameDayBody {
    date: NaiveDate,
    #[serde(default = "default_num_courts")]
    num_courts: usize,
}

fn default_num_courts() -> usize {
    2
}

#[derive(Deserialize)]
struct EnrollPlayerBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct SetPlayersBody {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct SetCourtsBody {
    num_courts: usize,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct MatchScoreBody {
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct SaveAllScoresBody {
    scores: Vec<MatchScoreBody>,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

/// Path segment: competition id (e.g. /api/competitions/{id})
#[derive(Deserialize)]
struct CompetitionPath {
    id: CompetitionId,
}

/// Path segments: competition id and game day id.
#[derive(Deserialize)]
struct GameDayPath {
    id: CompetitionId,
    day_id: GameDayId,
}

/// Path segments: competition id, game day id and player id.
#[derive(Deserialize)]
struct GameDayPlayerPath {
    id: CompetitionId,
    day_id: GameDayId,
    player_id: PlayerId,
}

/// Path segments: competition id, game day id and match id.
#[derive(Deserialize)]
struct GameDayMatchPath {
    id: CompetitionId,
    day_id: GameDayId,
    match_id: MatchId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-league-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register a player in the global directory.
#[post("/api/players")]
async fn api_create_player(state: SharedState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name is required" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut player = Player::new(name);
    player.gender = body.gender.clone();
    player.level = body.level.clone();
    player.birth_date = body.birth_date;
    let id = player.id;
    g.players.insert(id, player);
    HttpResponse::Ok().json(&g.players[&id])
}

/// List all players, sorted by name, with current age where known.
#[get("/api/players")]
async fn api_list_players(state: SharedState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let today = chrono::Utc::now().date_naive();
    let mut players: Vec<&Player> = g.players.values().collect();
    players.sort_by(|a, b| a.name.cmp(&b.name));
    let rows: Vec<serde_json::Value> = players
        .iter()
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "name": p.name,
                "gender": p.gender,
                "level": p.level,
                "birth_date": p.birth_date,
                "age": p.age_on(today),
            })
        })
        .collect();
    HttpResponse::Ok().json(rows)
}

/// Edit a player's profile: the form submits all fields, so omitted
/// optionals clear the stored value (404 if not found).
#[put("/api/players/{player_id}")]
async fn api_update_player(
    state: SharedState,
    path: Path<PlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.players.get_mut(&path.player_id) {
        Some(p) => {
            p.name = body.name.trim().to_string();
            p.gender = body.gender.clone();
            p.level = body.level.clone();
            p.birth_date = body.birth_date;
            HttpResponse::Ok().json(&*p)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Player not found" })),
    }
}

/// Create a new competition (returns it with id).
#[post("/api/competitions")]
async fn api_create_competition(
    state: SharedState,
    body: Json<CreateCompetitionBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let competition = Competition::new(body.name.trim(), body.start_date, body.end_date);
    let id = competition.id;
    g.competitions.insert(id, competition);
    HttpResponse::Ok().json(&g.competitions[&id])
}

/// List competitions, optionally filtered by a case-insensitive name search.
#[get("/api/competitions")]
async fn api_list_competitions(
    state: SharedState,
    query: Query<CompetitionSearchQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let search = query.search.as_deref().unwrap_or("").to_lowercase();
    let mut competitions: Vec<serde_json::Value> = g
        .competitions
        .values()
        .filter(|c| search.is_empty() || c.name.to_lowercase().contains(&search))
        .map(|c| {
            serde_json::json!({
                "id": c.id,
                "name": c.name,
                "start_date": c.start_date,
                "end_date": c.end_date,
                "status": c.status,
                "total_days": c.game_days.len(),
            })
        })
        .collect();
    competitions.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
    HttpResponse::Ok().json(competitions)
}

/// Get a competition by id (404 if not found).
#[get("/api/competitions/{id}")]
async fn api_get_competition(state: SharedState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.competitions.get(&path.id) {
        Some(c) => HttpResponse::Ok().json(c),
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Competition not found" }))
        }
    }
}

/// Edit a competition's name, dates and status.
#[put("/api/competitions/{id}")]
async fn api_edit_competition(
    state: SharedState,
    path: Path<CompetitionPath>,
    body: Json<EditCompetitionBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.competitions.get_mut(&path.id) {
        Some(c) => {
            c.name = body.name.trim().to_string();
            c.start_date = body.start_date;
            c.end_date = body.end_date;
            c.status = body.status;
            HttpResponse::Ok().json(&*c)
        }
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Competition not found" }))
        }
    }
}

/// Ranking over all matches of all game days of a competition.
#[get("/api/competitions/{id}/ranking")]
async fn api_competition_ranking(state: SharedState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let c = match g.competitions.get(&path.id) {
        Some(c) => c,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Competition not found" }))
        }
    };
    let matches = c.all_matches();
    match aggregate(&matches, &g.players) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add a game day to a competition (court count clamped to the minimum of 2).
#[post("/api/competitions/{id}/game-days")]
async fn api_create_game_day(
    state: SharedState,
    path: Path<CompetitionPath>,
    body: Json<CreateGameDayBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let c = match g.competitions.get_mut(&path.id) {
        Some(c) => c,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Competition not found" }))
        }
    };
    let day_id = c.add_game_day(body.date, body.num_courts);
    HttpResponse::Ok().json(c.game_day(day_id))
}

/// List a competition's game days (sorted by date) with enrollment status.
#[get("/api/competitions/{id}/game-days")]
async fn api_list_game_days(state: SharedState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let c = match g.competitions.get(&path.id) {
        Some(c) => c,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Competition not found" }))
        }
    };
    let mut days: Vec<serde_json::Value> = c
        .game_days
        .iter()
        .map(|d| {
            serde_json::json!({
                "id": d.id,
                "date": d.date,
                "num_courts": d.num_courts,
                "players": d.players,
                "current_players": d.players.len(),
                "max_players": d.capacity(),
                "has_matches": d.is_scheduled(),
            })
        })
        .collect();
    days.sort_by(|a, b| a["date"].as_str().cmp(&b["date"].as_str()));
    HttpResponse::Ok().json(days)
}

/// Delete a game day (rejected while it has matches or enrolled players).
#[delete("/api/competitions/{id}/game-days/{day_id}")]
async fn api_delete_game_day(state: SharedState, path: Path<GameDayPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let c = match g.competitions.get_mut(&path.id) {
        Some(c) => c,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Competition not found" }))
        }
    };
    match c.remove_game_day(path.day_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": path.day_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Enroll a player on a game day (roster must not be locked by matches).
#[post("/api/competitions/{id}/game-days/{day_id}/players")]
async fn api_enroll_player(
    state: SharedState,
    path: Path<GameDayPath>,
    body: Json<EnrollPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.players.contains_key(&body.player_id) {
        let e = CompetitionError::PlayerNotFound(body.player_id);
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match day.enroll(body.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*day),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Withdraw a player from a game day.
#[delete("/api/competitions/{id}/game-days/{day_id}/players/{player_id}")]
async fn api_withdraw_player(state: SharedState, path: Path<GameDayPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match day.withdraw(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*day),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Replace a game day's whole roster (the "update players" form).
#[put("/api/competitions/{id}/game-days/{day_id}/players")]
async fn api_set_players(
    state: SharedState,
    path: Path<GameDayPath>,
    body: Json<SetPlayersBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Some(&missing) = body.player_ids.iter().find(|id| !g.players.contains_key(id)) {
        let e = CompetitionError::PlayerNotFound(missing);
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match day.set_players(body.player_ids.clone()) {
        Ok(()) => HttpResponse::Ok().json(&*day),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Change a game day's court count (clamped to the minimum of 2).
#[put("/api/competitions/{id}/game-days/{day_id}/courts")]
async fn api_set_courts(
    state: SharedState,
    path: Path<GameDayPath>,
    body: Json<SetCourtsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    day.set_num_courts(body.num_courts);
    HttpResponse::Ok().json(&*day)
}

/// Generate the round-robin schedule for a game day.
#[post("/api/competitions/{id}/game-days/{day_id}/matches/generate")]
async fn api_generate_matches(state: SharedState, path: Path<GameDayPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match schedule_game_day(day) {
        Ok(()) => {
            log::info!(
                "Generated {} matches for game day {}",
                day.matches.len(),
                day.id
            );
            HttpResponse::Ok().json(&*day)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete all matches of a game day, unlocking its roster.
#[delete("/api/competitions/{id}/game-days/{day_id}/matches")]
async fn api_delete_matches(state: SharedState, path: Path<GameDayPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    day.clear_matches();
    HttpResponse::Ok().json(&*day)
}

/// A game day's matches plus its summary block and top-3 scorers.
#[get("/api/competitions/{id}/game-days/{day_id}/matches")]
async fn api_view_matches(state: SharedState, path: Path<GameDayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get(&path.id)
        .and_then(|c| c.game_day(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    let top3 = match top_players(&day.matches, &g.players, 3) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    HttpResponse::Ok().json(serde_json::json!({
        "game_day": day,
        "matches": day.matches,
        "summary": summarize(&day.matches),
        "top3": top3,
    }))
}

/// Record one match's score.
#[put("/api/competitions/{id}/game-days/{day_id}/matches/{match_id}/score")]
async fn api_update_score(
    state: SharedState,
    path: Path<GameDayMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match day.update_score(path.match_id, body.score_a, body.score_b) {
        Ok(()) => HttpResponse::Ok().json(&*day),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record many scores at once (the "save all" form). Unknown match ids are skipped.
#[put("/api/competitions/{id}/game-days/{day_id}/scores")]
async fn api_save_all_scores(
    state: SharedState,
    path: Path<GameDayPath>,
    body: Json<SaveAllScoresBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get_mut(&path.id)
        .and_then(|c| c.game_day_mut(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    for s in &body.scores {
        if let Some(m) = day.get_match_mut(s.match_id) {
            m.score_a = s.score_a;
            m.score_b = s.score_b;
        }
    }
    HttpResponse::Ok().json(&*day)
}

/// Ranking over one game day's matches.
#[get("/api/competitions/{id}/game-days/{day_id}/ranking")]
async fn api_game_day_ranking(state: SharedState, path: Path<GameDayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g
        .competitions
        .get(&path.id)
        .and_then(|c| c.game_day(path.day_id))
    {
        Some(d) => d,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "Game day not found" }))
        }
    };
    match aggregate(&day.matches, &g.players) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
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

    let state = Data::new(RwLock::new(AppState {
        players: HashMap::new(),
        competitions: HashMap::new(),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_update_player)
            .service(api_create_competition)
            .service(api_list_competitions)
            .service(api_get_competition)
            .service(api_edit_competition)
            .service(api_competition_ranking)
            .service(api_create_game_day)
            .service(api_list_game_days)
            .service(api_delete_game_day)
            .service(api_enroll_player)
            .service(api_withdraw_player)
            .service(api_set_players)
            .service(api_set_courts)
            .service(api_generate_matches)
            .service(api_delete_matches)
            .service(api_view_matches)
            .service(api_update_score)
            .service(api_save_all_scores)
            .service(api_game_day_ranking)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
