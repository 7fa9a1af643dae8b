use poker_ledger::{
    check_ledger, compute_stats, cumulative_series, people_from_last_n_sessions, read_rows,
    Amount, Baseline, Errors, Ledger,
};
use rust_decimal_macros::dec;

const SHEET: &str = "\
Date,Type,Buyin,Guest,Guest2,Rebuys,Notes,alice,bob,carol,dave
20230506,cash,20,,,\"bob: 1\",,80,,0,0
20230513,cash,20,,,,,10,30,,
20230520,cash,20,dan,,\"alice:1, carol: 2\",short night,30,,50,20
20230527,cash,20,,,,,,30,,10
";

fn ledger() -> Ledger {
    let rows = read_rows(SHEET.as_bytes()).unwrap();
    Ledger::build(&rows).unwrap()
}

#[test]
fn test_sheet_is_normalized_into_sessions() {
    let ledger = ledger();
    assert_eq!(ledger.len(), 4);

    let first = &ledger.sessions()[0];
    assert_eq!(first.date, "20230506");
    let names: Vec<_> = first.people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "carol", "dave"]);
    assert_eq!(first.get("alice").unwrap().net, dec!(60).into());

    // bob's rebuy is listed but he has no cash-out that night
    assert!(!first.attended("bob"));

    let third = &ledger.sessions()[2];
    assert_eq!(third.get("alice").unwrap().spent, dec!(40).into());
    assert_eq!(third.get("carol").unwrap().spent, dec!(60).into());
    assert_eq!(third.get("carol").unwrap().net, dec!(-10).into());
    assert!(!third.attended("Notes"));
}

#[test]
fn test_spent_is_multiple_of_buyin_and_net_is_out_minus_in() {
    for session in ledger().sessions() {
        for person in &session.people {
            assert_eq!(person.net, person.out - person.spent);
            assert!(!person.spent.is_negative());
            assert!((person.spent.0 % dec!(20)).is_zero());
        }
    }
}

#[test]
fn test_only_unbalanced_sessions_are_reported() {
    let discrepancies = check_ledger(&ledger());
    assert_eq!(discrepancies.len(), 2);
    assert_eq!(discrepancies[0].date, "20230506");
    assert_eq!(discrepancies[0].off_by, dec!(20).into());
    assert_eq!(discrepancies[1].date, "20230520");
    assert_eq!(discrepancies[1].off_by, dec!(-20).into());
}

#[test]
fn test_queries_over_the_sheet() {
    let ledger = ledger();

    assert_eq!(
        people_from_last_n_sessions(&ledger, 10),
        vec!["alice", "dave", "carol", "bob"]
    );
    assert_eq!(people_from_last_n_sessions(&ledger, 1), vec!["bob", "dave"]);

    let series = cumulative_series(
        &ledger,
        &["alice".to_string(), "bob".to_string()],
        2,
        Baseline::Ledger,
    );
    let alice: Vec<Amount> = vec![dec!(40).into(), dec!(40).into()];
    let bob: Vec<Amount> = vec![dec!(10).into(), dec!(20).into()];
    assert_eq!(series[0].data, alice);
    assert_eq!(series[1].data, bob);

    let stats = compute_stats(&ledger);
    assert_eq!(stats.overall[0].person.as_deref(), Some("alice"));
    assert_eq!(stats.overall[0].amount, dec!(40).into());
    assert_eq!(stats.overall[1].amount, dec!(60).into());
    // dave ties carol at -30 but never beats her
    assert_eq!(stats.overall[2].person.as_deref(), Some("carol"));
    assert_eq!(stats.overall[2].amount, dec!(-30).into());
    assert_eq!(stats.overall[3].person.as_deref(), Some("carol"));
    assert_eq!(stats.overall[3].amount, dec!(-20).into());
    assert_eq!(stats.overall[3].date.as_deref(), Some("20230506"));

    let alice = &stats.per_person[0];
    assert_eq!(alice.name, "alice");
    assert_eq!(alice.sessions, 3);
    assert_eq!(alice.win_ratio, dec!(0.33).into());
    assert_eq!(alice.profit_per_session, dec!(13.33).into());
}

#[test]
fn test_bad_cash_out_reports_the_row() {
    let sheet = "Date,Buyin,alice\n20230506,20,20\n20230513,20,n/a\n";
    let rows = read_rows(sheet.as_bytes()).unwrap();
    match Ledger::build(&rows) {
        Err(Errors::Row { row, date, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(date, "20230513");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_blank_and_unplayed_rows_become_empty_sessions() {
    let sheet = "Date,Buyin,Rebuys,alice,bob\n20230506,20,,30,10\n,,,,\n20230513,,,,\n";
    let rows = read_rows(sheet.as_bytes()).unwrap();
    let ledger = Ledger::build(&rows).unwrap();
    assert_eq!(ledger.len(), 3);
    assert!(ledger.sessions()[1].people.is_empty());
    assert_eq!(ledger.sessions()[2].date, "20230513");
    assert!(ledger.sessions()[2].people.is_empty());
    assert!(check_ledger(&ledger).is_empty());
    assert_eq!(people_from_last_n_sessions(&ledger, 3), vec!["alice", "bob"]);
}

#[test]
fn test_out_of_range_cash_out_fails_the_load() {
    let sheet = "Date,Buyin,alice,bob\n\
        20230506,20,79228162514264337593543950335,79228162514264337593543950335\n";
    let rows = read_rows(sheet.as_bytes()).unwrap();
    match Ledger::build(&rows) {
        Err(Errors::Row { row, source, .. }) => {
            assert_eq!(row, 1);
            assert!(matches!(*source, Errors::AmountOverflow { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
