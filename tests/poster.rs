// End-to-end tests using system fonts
//
// These are skipped (pass trivially) where no font is installed.

use poster_layout::extract::{Extract, KeywordExtractor};
use poster_layout::fonts::FontLibrary;
use poster_layout::{Config, Poster, Role};

fn poster(config: Config) -> Option<Poster> {
    let _ = env_logger::builder().is_test(true).try_init();
    let fonts = FontLibrary::new(&config);
    let poster = Poster::new(config, fonts);
    match poster.faces() {
        Ok(_) => Some(poster),
        Err(_) => {
            eprintln!("no system font found; skipping");
            None
        }
    }
}

#[test]
fn generate_writes_png() {
    let Some(poster) = poster(Config::default()) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("poster.png");
    let report = poster
        .generate("fun nature fair on August 12, 2025 in the park", &path)
        .unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (1080, 1350));
    assert_eq!(report.outcomes.len(), 3);
    let name = report.outcome(Role::EventName).unwrap();
    assert_eq!(name.item.content, "FUN NATURE FAIR");
    assert!(name.result.is_ok(), "{:?}", name.result);

    let rects = report.occupancy.rects();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.expand(20).intersects(b));
        }
    }
}

#[test]
fn same_seed_same_poster() {
    let Some(poster) = poster(Config::default().with_seed(9)) else {
        return;
    };
    let info = KeywordExtractor.extract("Jazz Night at Blue Note, Friday 8pm");
    let compose = || {
        let mut rng = poster_layout::rng::Rng::new(9);
        let design = poster_layout::design::DesignParams::from_event(
            &info,
            &poster.config().labels,
            &mut rng,
        );
        poster.compose(&info, &design, &mut rng).unwrap()
    };
    let a = compose();
    let b = compose();
    assert_eq!(a.report, b.report);
    assert_eq!(a.canvas.image(), b.canvas.image());
}

#[test]
fn text_is_drawn_where_placed() {
    let Some(poster) = poster(Config::default()) else {
        return;
    };
    let info = KeywordExtractor.extract("Open Day");
    let mut rng = poster_layout::rng::Rng::new(0);
    let design =
        poster_layout::design::DesignParams::from_event(&info, &poster.config().labels, &mut rng);
    let composition = poster.compose(&info, &design, &mut rng).unwrap();
    let canvas = &composition.canvas;
    for (outcome, placement) in composition.report.placed() {
        let r = placement.rect;
        let mut inked = false;
        for y in r.y1..r.y2 {
            for x in r.x1..r.x2 {
                if canvas.pixel(x as u32, y as u32) == outcome.item.color {
                    inked = true;
                }
            }
        }
        assert!(inked, "{:?} not drawn in {r:?}", outcome.role);
    }
}
