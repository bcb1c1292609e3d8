use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::hand::{
    best_five, compare_hands, evaluate, name_of, rank_of, Category, HandValue, INSUFFICIENT_NAME,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

fn eval(s: &str) -> HandValue {
    evaluate(&cards(s)).expect("at least five cards")
}

#[test]
fn detects_every_category() {
    let cases = [
        ("Ah Kh Qh Jh Th 2c 3d", Category::RoyalFlush),
        ("9h 8h 7h 6h 5h Ac Kd", Category::StraightFlush),
        ("As Ad Ah Ac Kc Qd 2h", Category::FourOfAKind),
        ("Ks Kd Kh Qc Qd 2h 3s", Category::FullHouse),
        ("As Js 8s 5s 2s Kd Qh", Category::Flush),
        ("5c 6h 7c 8h 9d 2s 3c", Category::Straight),
        ("7s 7d 7h Kc Qd 2h 3s", Category::ThreeOfAKind),
        ("Js Jd 4h 4c Ad 2h 9s", Category::TwoPair),
        ("As Ad 9h 7c 5d 3h 2s", Category::OnePair),
        ("As Kd 9h 7c 5d 3h 2s", Category::HighCard),
    ];
    for (hand, expected) in cases {
        let value = eval(hand);
        assert_eq!(value.category, expected, "{}", hand);
        assert_eq!(value.rank(), expected.rank());
        assert_eq!(value.name(), expected.name());
    }
}

#[test]
fn category_ordering_is_correct() {
    let quads = eval("Ac Ad Ah As Kc Qd 2h");
    let full_house = eval("Kc Kd Kh Qc Qd 2h 3s");
    assert!(compare_hands(&quads, &full_house).is_gt());

    let straight = eval("5c 6h 7c 8h 9d 2s 3c");
    let trips = eval("7s 7d 7h Kc Qd 2h 3s");
    assert!(straight > trips);

    let flush = eval("As Js 8s 5s 2s Kd Qh");
    assert!(flush > straight);
}

#[test]
fn royal_flush_is_category_ten() {
    let hand = cards("Ah Kh Qh Jh Th 2c 3d");
    assert_eq!(rank_of(&hand), 10);
    assert_eq!(name_of(&hand), "Royal Flush");
}

#[test]
fn wheel_is_five_high_and_loses_to_six_high_straight() {
    let wheel = eval("Ah 9c 2c 3d 4h 5s Kd");
    let six_high = eval("6h 9d 2c 3d 4h 5s Kd");
    assert_eq!(wheel.category, Category::Straight);
    assert_eq!(six_high.category, Category::Straight);
    assert_eq!(wheel.score(), 5);
    assert_eq!(six_high.score(), 6);
    assert!(six_high > wheel);
}

#[test]
fn steel_wheel_is_a_five_high_straight_flush() {
    let value = eval("Ah 2h 3h 4h 5h 9c 9d");
    assert_eq!(value.category, Category::StraightFlush);
    assert_eq!(value.score(), 5);
}

#[test]
fn scores_follow_leading_ranks() {
    assert_eq!(eval("Js Jd 4h 4c Ad 2h 9s").score(), 11 * 100 + 4);
    assert_eq!(eval("As Ad 9h 7c 5d 3h 2s").score(), 14);
    assert_eq!(eval("Ks Kd Kh Qc Qd 2h 3s").score(), 13);
    assert_eq!(eval("As Kd 9h 7c 5d 3h 2s").score(), 14);
}

#[test]
fn kickers_break_ties_within_a_category() {
    let ak = eval("As Ad Kh 7c 5d 3h 2s");
    let aq = eval("Ac Ah Qh 7d 5c 3s 2d");
    assert_eq!(ak.score(), aq.score());
    assert!(ak > aq);

    let flush_high = eval("As Js 9s 5s 2s");
    let flush_low = eval("Ah Jh 8h 5h 2h");
    assert!(flush_high > flush_low);

    let two_pair_kicker = eval("Js Jd 4h 4c Ad");
    let two_pair_low = eval("Jh Jc 4s 4d Kd");
    assert!(two_pair_kicker > two_pair_low);
}

#[test]
fn identical_ranks_in_other_suits_tie() {
    let a = eval("As Kd 9h 7c 5d");
    let b = eval("Ah Kc 9s 7d 5s");
    assert!(compare_hands(&a, &b).is_eq());
}

#[test]
fn two_trips_make_the_highest_full_house() {
    let value = eval("Ks Kd Kh Qc Qd Qh 2s");
    assert_eq!(value.category, Category::FullHouse);
    assert_eq!(value.kickers[0], 13);
    assert_eq!(value.kickers[1], 12);
}

#[test]
fn fewer_than_five_cards_is_insufficient() {
    let hand = cards("Ah Kh Qh Jh");
    assert!(evaluate(&hand).is_none());
    assert!(best_five(&hand).is_none());
    assert_eq!(rank_of(&hand), 0);
    assert_eq!(name_of(&hand), INSUFFICIENT_NAME);
    assert_eq!(rank_of(&[]), 0);
}

#[test]
fn best_five_returns_the_cards_that_make_the_hand() {
    let hand = cards("2c 3d Ah Kh Qh Jh Th");
    let (value, five) = best_five(&hand).unwrap();
    assert_eq!(value.category, Category::RoyalFlush);
    let mut chosen: Vec<String> = five.iter().map(|c| c.to_string()).collect();
    chosen.sort();
    let mut expected: Vec<String> = cards("Ah Kh Qh Jh Th").iter().map(|c| c.to_string()).collect();
    expected.sort();
    assert_eq!(chosen, expected);
}

#[test]
fn more_cards_never_make_a_worse_hand() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..200 {
        let mut deck = Deck::shuffled(&mut rng);
        let seven: Vec<Card> = (0..7).map(|_| deck.pop().unwrap()).collect();
        let five = evaluate(&seven[..5]).unwrap();
        let six = evaluate(&seven[..6]).unwrap();
        let all = evaluate(&seven).unwrap();
        assert!(six >= five);
        assert!(all >= six);
    }
}
