use holdem_engine::cards::parse_cards;
use holdem_engine::hand::{evaluate, HandValue};
use holdem_engine::pot::{split_evenly, Contribution, PotManager};

fn live(seat: usize, amount: u32) -> Contribution {
    Contribution {
        seat,
        amount,
        live: true,
    }
}

fn folded(seat: usize, amount: u32) -> Contribution {
    Contribution {
        seat,
        amount,
        live: false,
    }
}

fn hand(s: &str) -> Option<HandValue> {
    evaluate(&parse_cards(s).unwrap())
}

#[test]
fn heads_up_uncalled_excess_is_returned() {
    let pm = PotManager::from_contributions(&[live(0, 500), live(1, 1000)]);
    assert_eq!(pm.main_pot(), 1000);
    assert!(pm.side_pots().is_empty());
    assert_eq!(pm.returns(), &[(1, 500)]);
    assert_eq!(pm.total(), 1500);
}

#[test]
fn equal_stacks_no_side_pot() {
    let pm = PotManager::from_contributions(&[live(0, 1000), live(1, 1000)]);
    assert_eq!(pm.main_pot(), 2000);
    assert!(pm.side_pots().is_empty());
}

#[test]
fn three_way_all_in_layers() {
    let pm = PotManager::from_contributions(&[live(0, 100), live(1, 300), live(2, 500)]);
    assert_eq!(pm.main_pot(), 300);
    assert_eq!(pm.side_pots(), vec![400]);
    assert_eq!(pm.pots()[0].eligible, vec![0, 1, 2]);
    assert_eq!(pm.pots()[1].eligible, vec![1, 2]);
    // nobody matched seat 2's last 200
    assert_eq!(pm.returns(), &[(2, 200)]);
    assert_eq!(pm.total(), 900);
}

#[test]
fn folded_chips_stay_in_the_pot() {
    let pm = PotManager::from_contributions(&[folded(0, 60), live(1, 140), live(2, 140)]);
    assert_eq!(pm.total(), 340);
    assert!(pm.pots().iter().all(|p| !p.eligible.contains(&0)));
}

#[test]
fn short_stack_winner_takes_only_main_pot() {
    // seat 0 all-in for 50 with the best hand, seat 1 raised to 100
    let pm = PotManager::from_contributions(&[live(0, 50), live(1, 100)]);
    let hands = [hand("As Ad Ah Kc Qd"), hand("2s 3d 7h 9c Jd")];
    let settlement = pm.distribute(&[0, 1], |s| hands[s]);
    assert_eq!(settlement.won, vec![(0, 100)]);
    assert_eq!(settlement.returned, vec![(1, 50)]);
    assert_eq!(settlement.total(), 150);
}

#[test]
fn losing_big_stack_is_not_reported_as_a_winner() {
    // seat 2 shoves 40 and wins; seat 0 covered it with 1970
    let pm = PotManager::from_contributions(&[live(0, 1970), folded(1, 0), live(2, 40)]);
    let hands = [hand("Kc Kh Qd 4s 7c"), None, hand("Jh Jd Th Tc 9s")];
    let settlement = pm.distribute(&[2, 0, 1], |s| hands[s]);
    assert_eq!(settlement.won, vec![(2, 80)]);
    assert_eq!(settlement.returned, vec![(0, 1930)]);
}

#[test]
fn winner_collects_its_own_uncalled_chips() {
    let pm = PotManager::from_contributions(&[live(0, 100), live(1, 50)]);
    let hands = [hand("As Ad Ah Kc Qd"), hand("2s 3d 7h 9c Jd")];
    let settlement = pm.distribute(&[1, 0], |s| hands[s]);
    assert_eq!(settlement.won, vec![(0, 150)]);
    assert!(settlement.returned.is_empty());
}

#[test]
fn tied_hands_split_with_odd_chip_to_first_in_order() {
    let pm = PotManager::from_contributions(&[live(0, 15), live(1, 15), folded(2, 5)]);
    let same = hand("As Kd 9h 7c 5d");
    let settlement = pm.distribute(&[1, 2, 0], |_| same);
    assert_eq!(settlement.won, vec![(1, 18), (0, 17)]);
    assert!(settlement.returned.is_empty());
}

#[test]
fn uncontested_pot_goes_to_last_live_seat() {
    let pm = PotManager::from_contributions(&[folded(0, 10), live(1, 20)]);
    let settlement = pm.distribute(&[1, 0], |_| None);
    assert_eq!(settlement.won, vec![(1, 30)]);
    assert!(settlement.returned.is_empty());
}

#[test]
fn split_evenly_hands_out_remainder_in_order() {
    assert_eq!(split_evenly(10, &[4, 2, 7]), vec![(4, 4), (2, 3), (7, 3)]);
    assert_eq!(split_evenly(10, &[]), vec![]);
}
