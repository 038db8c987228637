mod helpers;

use helpers::{msg_days_ago, profile, test_ctx};
use warmpath::config::ScanConfig;
use warmpath::scoring::rank::{recommend, Urgency};

fn open_config() -> ScanConfig {
    ScanConfig {
        reference_city: None,
        max_results: 10,
        min_score: 0,
    }
}

#[test]
fn complementary_offer_surfaces_in_fit_and_score() {
    // Requester offers crypto knowledge; Alice asked for a crypto advisor
    // two days ago.
    let ctx = test_ctx(vec![msg_days_ago(
        "Alice",
        "Looking for a crypto advisor, any leads?",
        2,
    )]);
    let mut requester = profile("You");
    requester.offering = vec!["crypto knowledge".into()];

    let out = recommend(&ctx, &requester, &[profile("Alice")], &open_config());
    assert_eq!(out.len(), 1);
    let rec = &out[0];
    assert!(rec.score > 0);
    assert!(rec
        .fit
        .reasons
        .iter()
        .any(|r| r.contains("crypto knowledge") && r.contains("crypto advisor")));
    assert_eq!(rec.fit.you_can_help, vec!["crypto advisor"]);
    // The outreach draft leads with the unmet need.
    assert!(rec.activation.message.contains("crypto advisor"));
}

#[test]
fn same_city_travel_earns_the_timing_bonus() {
    let ctx = test_ctx(vec![msg_days_ago("Alice", "just landed in Bangkok", 1)]);
    let requester = profile("You");
    let candidates = [profile("Alice")];

    let mut with_city = open_config();
    with_city.reference_city = Some("bkk".into());
    let matched = recommend(&ctx, &requester, &candidates, &with_city);
    let unmatched = recommend(&ctx, &requester, &candidates, &open_config());

    let timing = matched[0].timing.as_ref().unwrap();
    assert!(timing.timing_match);
    assert_eq!(matched[0].score, unmatched[0].score + 25);
    assert_eq!(matched[0].activation.urgency, Urgency::Urgent);
}

#[test]
fn scores_stay_inside_the_band_and_respect_the_floor() {
    let ctx = test_ctx(vec![
        msg_days_ago("Alice", "we're hiring a founding engineer", 1),
        msg_days_ago("Alice", "we're raising a seed", 1),
        msg_days_ago("Alice", "looking to hire a designer too", 1),
        msg_days_ago("Ben", "nothing much happening here", 1),
    ]);
    let requester = profile("You");
    let candidates = vec![profile("Alice"), profile("Ben")];

    let all = recommend(&ctx, &requester, &candidates, &open_config());
    assert!(all.iter().all(|r| r.score <= 100));
    assert_eq!(all[0].person, "Alice");
    assert_eq!(all[0].score, 100);

    // A floor nobody clears is a valid empty result, not an error.
    let mut strict = open_config();
    strict.min_score = 100;
    let some = recommend(&ctx, &requester, &candidates, &strict);
    assert_eq!(some.len(), 1, "only Alice clears a floor of 100");
}

#[test]
fn max_results_caps_the_list() {
    let ctx = test_ctx(vec![
        msg_days_ago("Alice", "looking for a designer", 1),
        msg_days_ago("Ben", "looking for a designer", 1),
        msg_days_ago("Cara", "looking for a designer", 1),
    ]);
    let requester = profile("You");
    let candidates = vec![profile("Alice"), profile("Ben"), profile("Cara")];
    let mut cfg = open_config();
    cfg.max_results = 2;
    let out = recommend(&ctx, &requester, &candidates, &cfg);
    assert_eq!(out.len(), 2);
    // Stable tie-break keeps candidate order.
    assert_eq!(out[0].person, "Alice");
    assert_eq!(out[1].person, "Ben");
}

#[test]
fn candidates_missing_from_the_transcript_still_rank_on_fit() {
    // Quiet member with a perfect profile complement: no signals, no
    // activity bonus, but fit alone can clear a low floor.
    let ctx = test_ctx(vec![msg_days_ago("Someone Else", "hello", 1)]);
    let mut requester = profile("You");
    requester.looking_for = vec!["legal advice".into()];
    let mut quiet = profile("Quiet Quentin");
    quiet.offering = vec!["startup legal advice".into()];

    let mut cfg = open_config();
    cfg.min_score = 10;
    let out = recommend(&ctx, &requester, &[quiet], &cfg);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, 15);
    assert_eq!(out[0].fit.they_can_help, vec!["startup legal advice"]);
}
