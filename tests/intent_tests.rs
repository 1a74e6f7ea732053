// Host-side tests for the textual intent and script forms.

use effigy_core::{
    ChannelId, Intent, LayerId, ParseIntentError, Script, ScriptError, Session, SessionConfig,
    Stage, StageSequence,
};
use glam::Vec2;
use std::time::Duration;

#[test]
fn parses_every_verb() {
    let cases = [
        ("toggle-layer outer", Intent::ToggleLayer(LayerId::Outer)),
        ("toggle-layer BASE", Intent::ToggleLayer(LayerId::Base)),
        ("toggle-channel earth", Intent::ToggleChannel(ChannelId::Earth)),
        (
            "pointer 150 140.5 300 400",
            Intent::Pointer {
                point: Vec2::new(150.0, 140.5),
                bounds: Vec2::new(300.0, 400.0),
            },
        ),
        ("trigger", Intent::TriggerSequence),
        ("pain", Intent::TriggerPain),
        ("death", Intent::TriggerDeath),
        ("respawn", Intent::Respawn),
        ("  reset  ", Intent::ResetAll),
        ("intensity 80", Intent::SetIntensity(80)),
    ];
    for (text, expected) in cases {
        assert_eq!(text.parse::<Intent>(), Ok(expected), "{text:?}");
    }
}

#[test]
fn intensity_above_range_is_clamped() {
    assert_eq!("intensity 150".parse(), Ok(Intent::SetIntensity(100)));
}

#[test]
fn display_reads_back_as_the_same_intent() {
    let intent = Intent::Pointer {
        point: Vec2::new(12.5, 300.0),
        bounds: Vec2::new(300.0, 400.0),
    };
    assert_eq!(intent.to_string(), "pointer 12.5 300 300 400");
    assert_eq!(intent.to_string().parse(), Ok(intent));
    assert_eq!(Intent::ResetAll.to_string(), "reset");
}

#[test]
fn malformed_intents_are_rejected() {
    assert_eq!("".parse::<Intent>(), Err(ParseIntentError::Empty));
    assert_eq!(
        "dance".parse::<Intent>(),
        Err(ParseIntentError::UnknownVerb("dance".into()))
    );
    assert_eq!(
        "toggle-layer".parse::<Intent>(),
        Err(ParseIntentError::MissingArgument {
            verb: "toggle-layer",
            what: "layer"
        })
    );
    assert_eq!(
        "toggle-layer skin".parse::<Intent>(),
        Err(ParseIntentError::UnknownLayer("skin".into()))
    );
    assert_eq!(
        "toggle-channel lava".parse::<Intent>(),
        Err(ParseIntentError::UnknownChannel("lava".into()))
    );
    assert_eq!(
        "pointer 1 2 three 4".parse::<Intent>(),
        Err(ParseIntentError::InvalidNumber("three".into()))
    );
    assert_eq!(
        "intensity -5".parse::<Intent>(),
        Err(ParseIntentError::InvalidNumber("-5".into()))
    );
    assert_eq!(
        "respawn now".parse::<Intent>(),
        Err(ParseIntentError::TrailingArgument {
            verb: "respawn",
            expected: 0
        })
    );
}

#[test]
fn script_skips_comments_and_blank_lines() {
    let script: Script = "\
# warm up
0     toggle-layer outer

250   toggle-channel water
250   pointer 10 10 300 400
"
    .parse()
    .expect("valid script");
    assert_eq!(script.len(), 3);
    let lines: Vec<usize> = script.steps().iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 4, 5]);
    assert_eq!(script.end(), Duration::from_millis(250));
}

#[test]
fn script_errors_name_the_line() {
    assert_eq!(
        "100 trigger\n50 respawn".parse::<Script>(),
        Err(ScriptError::OutOfOrder {
            line: 2,
            at_ms: 50,
            previous_ms: 100
        })
    );
    assert_eq!(
        "toggle-layer outer".parse::<Script>(),
        Err(ScriptError::MissingTimestamp { line: 1 })
    );
    assert_eq!(
        "\n1.5s trigger".parse::<Script>(),
        Err(ScriptError::InvalidTimestamp {
            line: 2,
            text: "1.5s".into()
        })
    );
    assert!(matches!(
        "0 toggle-layer skin".parse::<Script>(),
        Err(ScriptError::Intent { line: 1, .. })
    ));
}

#[test]
fn empty_script_is_valid() {
    let script: Script = "# nothing\n\n".parse().expect("valid script");
    assert!(script.is_empty());
    assert_eq!(script.end(), Duration::ZERO);
}

#[test]
fn replaying_a_script_drives_the_session() {
    let stages = StageSequence::new(vec![
        Stage::new(1, "only", "", Duration::from_millis(500), &[]),
    ])
    .expect("valid stages");
    let mut session =
        Session::new(SessionConfig::default().with_stages(stages)).expect("valid config");
    let script: Script = "\
0     toggle-channel water
3000  toggle-layer outer
3100  respawn
3200  toggle-layer outer
"
    .parse()
    .expect("valid script");

    let mut accepted = Vec::new();
    for step in script.steps() {
        session.advance_to(step.at);
        accepted.push(session.apply(step.intent));
    }
    // submersion auto-starts at 1500 and the single stage kills at 2000
    assert_eq!(accepted, vec![true, false, true, true]);
    assert!(!session.is_dead());
    assert!(session.layer(LayerId::Outer).removing());
}
