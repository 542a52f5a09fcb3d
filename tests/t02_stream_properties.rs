extern crate vgr2d;

use vgr2d::{Shape, Paint, RasterConfig, Cmd, MIN_DX};

fn scene() -> Vec<Shape> {
    vec![
        Shape::rect(40, 20, 0x03).unwrap().at(5, 5),
        Shape::rect(30, 30, 0x1c).unwrap().at(20, 10),
        Shape::polygon(&[(60,10),(90,15),(80,50),(65,40)], Paint::Fill(0x41)).unwrap(),
        Shape::polyline(&[(10,60),(50,70),(30,90),(70,95)], 0x22, 3).unwrap(),
        Shape::polygon(&[(100,20),(140,30),(120,60)], Paint::Stroke { color: 0x15, width: 4 }).unwrap(),
        Shape::line(0, 0, 150, 99, 0x0f, 2).unwrap(),
        Shape::rect(200, 3, 0x33).unwrap().at(100, 97),
        Shape::polygon(&[(0,100),(20,80),(40,100)], Paint::Fill(0x11)).unwrap(),
    ]
}

/// Check a stream word by word, returns the lines drawn
fn check_stream(bytes: &[u8], width: i32) -> Vec<i32> {
    let xres = width * 16;
    let mut lines = vec![];
    let mut y = 0;
    let mut cur = 0;
    for cmd in vgr2d::decode(&bytes[2..]).unwrap() {
        match cmd {
            Cmd::Jump(ny) => {
                let ny = i32::from(ny);
                assert!(lines.last().map_or(true, |&l| ny > l), "jump back to {}", ny);
                y = ny;
                cur = 0;
            }
            Cmd::NextLine(x) => {
                let last = *lines.last().expect("next line before any line");
                y = last + 1;
                cur = i32::from(x);
            }
            Cmd::Skip(dx) => {
                assert!(i32::from(dx) >= MIN_DX, "skip of {}", dx);
                cur += i32::from(dx);
            }
            Cmd::Draw { span, .. } => {
                assert!(i32::from(span) >= MIN_DX, "draw of {} on line {}", span, y);
                cur += i32::from(span);
                assert!(cur <= xres, "line {} drawn to {}", y, cur);
                if lines.last() != Some(&y) {
                    lines.push(y);
                }
            }
            Cmd::Continue(s) => {
                assert!(i32::from(s) >= MIN_DX, "continue of {}", s);
                cur += i32::from(s);
                assert!(cur <= xres, "line {} drawn to {}", y, cur);
            }
            Cmd::End => {}
        }
    }
    lines
}

#[test]
fn t02_minimum_width_and_cursor() {
    let _ = env_logger::builder().is_test(true).try_init();
    for &(w, h) in &[(160, 120), (100, 50), (64, 64), (4095, 200)] {
        let cfg = RasterConfig::new(w, h);
        let bytes = vgr2d::generate(&cfg, &scene()).unwrap();
        let lines = check_stream(&bytes, i32::from(w));
        assert!(!lines.is_empty());
        assert!(*lines.last().unwrap() < i32::from(h));
        // Replay agrees with the raster width
        let r = vgr2d::replay(&bytes, Some(cfg.xres())).unwrap();
        let ys : Vec<_> = r.lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, lines);
    }
}

#[test]
fn t02_monotonic_lines() {
    let cfg = RasterConfig::new(160, 120);
    let bytes = vgr2d::generate(&cfg, &scene()).unwrap();
    let lines = check_stream(&bytes, 160);
    for w in lines.windows(2) {
        assert!(w[0] < w[1]);
    }
    // Every line of the scene is covered
    assert_eq!(lines, (0 .. 101).collect::<Vec<_>>());
    // Next line is used wherever the previous line was drawn
    let cmds = vgr2d::decode(&bytes[2..]).unwrap();
    let jumps = cmds.iter().filter(|c| matches!(c, Cmd::Jump(_))).count();
    let nexts = cmds.iter().filter(|c| matches!(c, Cmd::NextLine(_))).count();
    assert_eq!(jumps + nexts, lines.len() - 1);
    assert!(nexts > jumps);
}

#[test]
fn t02_long_runs_are_split() {
    let cfg = RasterConfig::new(4095, 4);
    let shapes = vec![Shape::rect(4000, 2, 0x05).unwrap().at(10, 1)];
    let bytes = vgr2d::generate(&cfg, &shapes).unwrap();
    let cmds = vgr2d::decode(&bytes[2..]).unwrap();
    assert!(cmds.iter().any(|c| matches!(c, Cmd::Continue(_))));
    let lines = check_stream(&bytes, 4095);
    assert_eq!(lines, vec![1, 2]);
    let r = vgr2d::replay(&bytes, Some(cfg.xres())).unwrap();
    for l in &r.lines {
        assert_eq!(l.runs.len(), 1);
        assert_eq!(l.runs[0].x1, 160);
        assert_eq!(l.runs[0].x2, 160 + 3999 * 16);
    }
}

#[test]
fn t02_sloped_edges_near_left_border() {
    let cfg = RasterConfig::new(100, 100);
    let shapes = [
        Shape::polygon(&[(1,5),(10,15),(0,15)], Paint::Fill(3)).unwrap(),
        Shape::polygon(&[(0,20),(3,60),(40,60)], Paint::Fill(4)).unwrap(),
        Shape::polygon(&[(2,70),(30,72),(1,90)], Paint::Fill(5)).unwrap(),
        Shape::polyline(&[(1,2),(5,40),(2,80)], 6, 2).unwrap(),
    ];
    for s in &shapes {
        let bytes = vgr2d::generate(&cfg, &[s.clone()]).unwrap();
        let lines = check_stream(&bytes, 100);
        assert!(!lines.is_empty(), "{}", s);
        let r = vgr2d::replay(&bytes, Some(cfg.xres())).unwrap();
        let ys : Vec<_> = r.lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, lines);
    }
    // The first line after the apex is drawn from the border
    let bytes = vgr2d::generate(&cfg, &shapes[..1]).unwrap();
    let cmds = vgr2d::decode(&bytes[2..]).unwrap();
    assert_eq!(cmds[0], Cmd::Jump(6));
    assert!(matches!(cmds[1], Cmd::Draw { color: 3, .. }));
}
