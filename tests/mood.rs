use cadl::{
    mood::{apply_mood_override, rule_for, MOOD_RULES},
    value::Cat,
};

fn cat_with(traits: &[(&str, &str)]) -> Cat {
    Cat::with_traits(traits.iter().copied())
}

#[test]
fn unset_mood_is_a_no_op() {
    let mut cat = cat_with(&[("ears", "long"), ("whiskers", "curled")]);
    let before = cat.clone();
    apply_mood_override(&mut cat);
    assert_eq!(cat, before);
}

#[test]
fn unrecognized_mood_leaves_traits_alone() {
    let mut cat = cat_with(&[("mood", "grumpy"), ("ears", "long")]);
    let before = cat.clone();
    apply_mood_override(&mut cat);
    assert_eq!(cat, before);
    assert_eq!(cat.get("mood"), Some("grumpy"));
}

#[test]
fn every_rule_overwrites_ears_whiskers_and_unlocked_mouth() {
    for rule in MOOD_RULES {
        let mut cat = cat_with(&[("mood", rule.mood), ("ears", "x"), ("whiskers", "y")]);
        apply_mood_override(&mut cat);
        assert_eq!(cat.get("ears"), Some(rule.ears), "ears for {}", rule.mood);
        assert_eq!(cat.get("whiskers"), Some(rule.whiskers), "whiskers for {}", rule.mood);
        assert_eq!(cat.get("mouth"), rule.mouth, "mouth for {}", rule.mood);
        assert!(cat.contains("mouth"));
    }
}

#[test]
fn table_matches_documented_values() {
    let happy = rule_for("happy").expect("happy is a mood");
    assert_eq!((happy.ears, happy.whiskers, happy.mouth), ("short", "long", Some("smile")));
    let angry = rule_for("angry").expect("angry is a mood");
    assert_eq!((angry.ears, angry.whiskers, angry.mouth), ("round", "curled", Some("scowl")));
    let sleepy = rule_for("sleepy").expect("sleepy is a mood");
    assert_eq!(sleepy.mouth, Some("neutral"));
    assert_eq!(rule_for("curious").map(|rule| rule.mouth), Some(None));
    assert!(rule_for("bored").is_none());
}

#[test]
fn mood_matching_ignores_case() {
    let mut cat = cat_with(&[("mood", "ExCiTeD")]);
    apply_mood_override(&mut cat);
    assert_eq!(cat.get("ears"), Some("long"));
    assert_eq!(cat.get("mouth"), Some("open"));
    assert_eq!(cat.get("mood"), Some("ExCiTeD"));
}

#[test]
fn existing_mouth_is_locked() {
    let mut cat = cat_with(&[("mood", "sad"), ("mouth", "smirk")]);
    apply_mood_override(&mut cat);
    assert_eq!(cat.get("mouth"), Some("smirk"));
    assert_eq!(cat.get("ears"), Some("droopy"));
}

#[test]
fn curious_clears_an_unlocked_mouth_but_keeps_the_key() {
    let mut cat = cat_with(&[("mood", "curious")]);
    apply_mood_override(&mut cat);
    assert!(cat.contains("mouth"));
    assert_eq!(cat.get("mouth"), None);
}

#[test]
fn curious_keeps_a_locked_mouth() {
    let mut cat = cat_with(&[("mood", "curious"), ("mouth", "smile")]);
    apply_mood_override(&mut cat);
    assert_eq!(cat.get("mouth"), Some("smile"));
}

#[test]
fn applying_twice_equals_applying_once() {
    for rule in MOOD_RULES {
        for locked in [false, true] {
            let mut cat = cat_with(&[("mood", rule.mood), ("body", "fluffy")]);
            if locked {
                cat.set("mouth", Some("kiss".to_string()));
            }
            apply_mood_override(&mut cat);
            let once = cat.clone();
            apply_mood_override(&mut cat);
            assert_eq!(cat, once, "{} (locked: {locked})", rule.mood);
        }
    }
}

#[test]
fn second_application_sees_the_mouth_as_locked() {
    let mut cat = cat_with(&[("mood", "happy")]);
    apply_mood_override(&mut cat);
    cat.set("mood", Some("sad".to_string()));
    apply_mood_override(&mut cat);
    assert_eq!(cat.get("mouth"), Some("smile"));
    assert_eq!(cat.get("ears"), Some("droopy"));
}
