use std::io::{self, Read};
use std::{env, fs, process};

use rtcoffer::sdp::list_codecs;
use rtcoffer::session::{CodecChoice, apply_codec_choices};
use rtcoffer::settings::CodecSettings;

fn usage(prog: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {prog} <FILE|-> [--audio CODEC] [--video CODEC]   # filter, print SDP");
    eprintln!("  {prog} <FILE|-> --list                            # list codecs per section");
    eprintln!();
    eprintln!("  CODEC 'default' leaves that kind untouched.");
    process::exit(2);
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn choice(arg: Option<&String>, prog: &str) -> CodecChoice {
    match arg {
        Some(name) => name.parse().unwrap_or_default(),
        None => usage(prog),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map_or("sdp_filter", String::as_str);

    let mut input = None;
    let mut codecs = CodecSettings::default();
    let mut list = false;

    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--audio" => codecs.audio = choice(it.next(), prog),
            "--video" => codecs.video = choice(it.next(), prog),
            "--list" => list = true,
            "-h" | "--help" => usage(prog),
            other if input.is_none() => input = Some(other.to_owned()),
            _ => usage(prog),
        }
    }
    let Some(input) = input else { usage(prog) };

    let sdp = match read_input(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[sdp_filter] cannot read {input}: {e}");
            process::exit(1);
        }
    };

    if list {
        for section in list_codecs(&sdp) {
            println!("{}:", section.kind);
            for c in &section.codecs {
                println!("  {c}");
            }
        }
        return;
    }

    print!("{}", apply_codec_choices(&sdp, &codecs));
}
