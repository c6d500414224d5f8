//! Drives the exported request handler the way the Web Worker bridge does.

use secret_show_server::{configure, handle_request};

fn post(path: &str, body: &str) -> String {
    handle_request("POST", path, "", body)
}

fn get(path: &str) -> String {
    handle_request("GET", path, "", "")
}

#[test]
fn treasure_chest_day() {
    assert_eq!(configure(r#"{"seed":42,"suspenseDelayMs":500}"#), "ok");
    assert!(get("/api/chest").contains("Play (3 left)"));

    post("/api/chest", "action=open");
    for round in 0..3 {
        post("/api/chest", "action=select&key=2");
        let html = post("/api/chest", "action=attempt");
        assert!(html.contains("load delay:500ms"));
        let html = post("/api/chest", "action=resolve");
        assert!(html.contains("You won!") || html.contains("Not this time"));
        if round < 2 {
            assert!(html.contains("Try again"));
            post("/api/chest", "action=retry");
        } else {
            assert!(html.contains("Come back tomorrow!"));
        }
    }

    let html = post("/api/chest", "action=close");
    assert!(html.contains("No attempts left"));

    let state: serde_json::Value = serde_json::from_str(&get("/api/state/persist")).unwrap();
    let game: serde_json::Value =
        serde_json::from_str(state["treasureGameState"].as_str().unwrap()).unwrap();
    assert_eq!(game["attemptsLeft"], 0);
    assert_eq!(game["gamePhase"], "closed");

    let behavior: serde_json::Value =
        serde_json::from_str(state["secret-show-behavior"].as_str().unwrap()).unwrap();
    assert_eq!(behavior["gameAttempts"], 3);
}

#[test]
fn stale_day_restores_fresh_attempts() {
    assert_eq!(configure(r#"{"seed":1}"#), "ok");
    let snapshot = serde_json::json!({
        "treasureGameState": r#"{"attemptsLeft":0,"lastPlayDate":"2001-02-03","gamePhase":"closed"}"#,
        "secret-show-behavior": r#"{"visitCount":2,"ticketInterest":true}"#,
    });
    let html = post("/api/state/restore", &snapshot.to_string());
    assert!(html.contains(r#"\"attemptsLeft\":3"#));
    assert!(get("/api/chest").contains("Play (3 left)"));

    post("/api/behavior", "event=visit&width=1024");
    let content: serde_json::Value =
        serde_json::from_str(&get("/api/behavior/content")).unwrap();
    assert_eq!(content["welcome"], "Good to see you again! This is visit #3.");
    assert_eq!(content["action"], "Finish booking your tickets");
}

#[test]
fn booking_two_seats_and_paying() {
    assert_eq!(configure(r#"{"seed":8,"paymentDelayMs":1500}"#), "ok");
    post("/api/booking", "action=show&id=5");

    let persisted: serde_json::Value = serde_json::from_str(&get("/api/state/persist")).unwrap();
    assert!(persisted["secret-show-behavior"]
        .as_str()
        .unwrap()
        .contains(r#""preferredShowTime":"19:00""#));

    // Seats are `<show>-<row>-<number>`; pick the first two free regular seats.
    let html = get("/api/booking");
    let free: Vec<String> = (4..=10)
        .flat_map(|row| (1..=20).map(move |n| format!("5-{row}-{n}")))
        .filter(|id| {
            let marker = format!(r#""id":"{id}"}}'"#);
            html.split(&marker)
                .nth(1)
                .is_some_and(|rest| !rest.split('>').next().unwrap_or("").contains("disabled"))
        })
        .take(2)
        .collect();
    assert_eq!(free.len(), 2);

    for id in &free {
        post("/api/booking", &format!("action=seat&id={id}"));
    }
    let html = post("/api/booking", "action=checkout");
    assert!(html.contains("Pay 3600₽"));

    let html = post("/api/booking", "action=pay");
    assert!(html.contains("load delay:1500ms"));
    let html = post("/api/booking", "action=complete");
    assert!(html.contains("2 seat(s), total paid: 3600₽"));
    assert!(html.contains("1. Date"));

    let events: serde_json::Value = serde_json::from_str(&get("/api/analytics/drain")).unwrap();
    assert_eq!(events[0]["name"], "ticket_purchase_click");
    assert_eq!(events[1]["name"], "ticket_purchase");
    assert_eq!(events[1]["label"], "checkout");
}

#[test]
fn unknown_routes_and_methods() {
    assert!(get("/api/tickets").contains("404"));
    assert!(handle_request("DELETE", "/api/chest", "", "").contains("405"));
}

#[test]
fn closing_mid_suspense_cannot_save_attempts() {
    assert_eq!(configure(r#"{"seed":5}"#), "ok");
    for _ in 0..10 {
        post("/api/chest", "action=open");
        post("/api/chest", "action=select&key=1");
        post("/api/chest", "action=attempt");
        post("/api/chest", "action=close");
    }

    let state: serde_json::Value = serde_json::from_str(&get("/api/state/persist")).unwrap();
    let game: serde_json::Value =
        serde_json::from_str(state["treasureGameState"].as_str().unwrap()).unwrap();
    let behavior: serde_json::Value =
        serde_json::from_str(state["secret-show-behavior"].as_str().unwrap()).unwrap();
    assert_eq!(game["attemptsLeft"], 0);
    assert_eq!(behavior["gameAttempts"], 3);
}
