// Copyright 2025 Cowboy AI, LLC.

//! Composing a pixel from color mixins
//!
//! This example shows:
//! - Building feature prototypes from the root prototype
//! - Mixing several features into one prototype
//! - Inheriting from a composed prototype and calling the overridden initializer
//! - Querying features on instances

use cim_prototype::{base, Object, PropertyBag, PrototypeError, PrototypeResult, Value};

fn channel(this: &dyn Object, offset: usize) -> PrototypeResult<Value> {
    let color = this.get_str("color")?;
    let digits = color
        .get(offset..offset + 2)
        .ok_or_else(|| PrototypeError::method(format!("color '{color}' is too short")))?;
    i64::from_str_radix(digits, 16)
        .map(Value::Int)
        .map_err(|e| PrototypeError::method(e.to_string()))
}

fn main() -> PrototypeResult<()> {
    let hex = base()
        .compose()
        .label("HEX")
        .own(PropertyBag::new().method("hex", |this, _args| {
            Ok(Value::from(format!("#{}", this.get_str("color")?)))
        }))
        .build();

    let rgb = base()
        .compose()
        .label("RGB")
        .own(
            PropertyBag::new()
                .method("red", |this, _args| channel(this, 0))
                .method("green", |this, _args| channel(this, 2))
                .method("blue", |this, _args| channel(this, 4)),
        )
        .build();

    let color = base()
        .compose()
        .label("Color")
        .mixins(&[&hex, &rgb])
        .own(PropertyBag::new().method("initialize", |this, args| {
            this.set("color", args.first().cloned().unwrap_or_default())?;
            Ok(Value::Undefined)
        }))
        .build();

    let color_init = color.method("initialize")?;
    let pixel = color
        .compose()
        .label("Pixel")
        .own(
            PropertyBag::new()
                .method("initialize", move |this, args| {
                    color_init.call(this, args.get(2..).unwrap_or_default())?;
                    this.set("x", args.first().cloned().unwrap_or_default())?;
                    this.set("y", args.get(1).cloned().unwrap_or_default())?;
                    Ok(Value::Undefined)
                })
                .method("toString", |this, _args| {
                    let x = this.require("x")?;
                    let y = this.require("y")?;
                    let hex = this.invoke("hex", &[])?;
                    Ok(Value::from(format!("{x}:{y}@{hex}")))
                }),
        )
        .build();

    let mut p = pixel.new(&[Value::Int(11), Value::Int(23), Value::from("CC3399")])?;
    println!("pixel:  {}", p.invoke("toString", &[])?);
    println!(
        "rgb:    {} {} {}",
        p.invoke("red", &[])?,
        p.invoke("green", &[])?,
        p.invoke("blue", &[])?
    );

    for feature in [&hex, &rgb, &color, &pixel] {
        println!("has {:<6} {}", feature.to_string(), p.has_feature(feature));
    }

    let mut frozen = pixel.clone();
    if let Err(err) = frozen.set("x", Value::Int(0)) {
        println!("frozen: {err}");
    }

    Ok(())
}
