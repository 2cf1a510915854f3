//! Validates the code examples from README.md compile and behave correctly.

use pixfmt::{
    Axes, Channel, Image, Layout, LayoutError, Size, align, convert, convert_aligned, flip,
    is_aligned, scale,
};

#[test]
fn readme_converting() -> Result<(), LayoutError> {
    let rgb = Image::new(
        Size::new(2, 1),
        Layout::Rgb.channels(8),
        0,
        vec![10, 20, 30, 255, 0, 0],
    )?;

    let bgr = convert(&rgb, &Layout::Bgr.channels(8));
    assert_eq!(bgr.data, [30, 20, 10, 0, 0, 255]);

    let gray = convert(&rgb, &[Channel::gray(8)]);
    assert_eq!(gray.data, [20, 85]);

    let rgb565 = [Channel::red(5), Channel::green(6), Channel::blue(5)];
    let packed = convert_aligned(&rgb, &rgb565, 4);
    assert_eq!(packed.data.len(), 4);
    // r=10 -> 1, g=20 -> 5, b=30 -> 4
    assert_eq!(&packed.data[..2], &[0b0000_1000, 0b1010_0100]);
    Ok(())
}

#[test]
fn readme_scale_flip_align() -> Result<(), LayoutError> {
    let img = Image::new(
        Size::new(4, 4),
        Layout::Rgba.channels(8),
        0,
        [9, 8, 7, 255].repeat(16),
    )?;

    let small = scale(&img, Size::new(2, 2));
    assert_eq!(small.data, [9, 8, 7, 255].repeat(4));

    let upside_down = flip(&img, Axes::Y);
    assert_eq!(*flip(&upside_down, Axes::Y), img);

    assert!(is_aligned(&img, 8));
    assert_eq!(align(&img, 8).data, img.data);
    Ok(())
}

#[test]
fn readme_named_layouts() {
    let channels = Layout::Bgra.channels(8);
    assert_eq!(Layout::detect(&channels), Some((Layout::Bgra, 8)));

    let odd = [Channel::gray(12), Channel::alpha(4)];
    assert_eq!(Layout::detect(&odd), None);
    assert_eq!(Layout::nearest(&odd), (Layout::GrayAlpha, 16));
}

#[cfg(feature = "rgb")]
#[test]
fn readme_typed_rgb() -> Result<(), LayoutError> {
    use pixfmt::typed;
    use rgb::{Bgra, Rgb};

    let pixels = vec![Rgb::new(255u8, 0, 128); 4];
    let img = typed::from_pixels(&pixels, Size::new(2, 2))?;
    let bgra: Vec<Bgra<u8>> = typed::to_pixels(&img);
    assert_eq!(bgra[0], Bgra { b: 128, g: 0, r: 255, a: 255 });
    Ok(())
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() -> Result<(), LayoutError> {
    use ::imgref::ImgVec;
    use pixfmt::img;
    use rgb::{Gray, Rgba};

    let src = ImgVec::new(vec![Rgba::new(90u8, 90, 90, 255); 640 * 480], 640, 480);
    let image = img::from_img(src.as_ref())?;
    let gray: ImgVec<Gray<u8>> = img::to_img(&image);
    assert_eq!(gray.width(), 640);
    assert_eq!(gray.height(), 480);
    assert_eq!(gray.buf()[0], Gray::new(90));
    Ok(())
}
