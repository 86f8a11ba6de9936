pub mod blur_plates_use_case;
