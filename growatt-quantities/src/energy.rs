quantity!(KilowattHours, suffix: "kWh", precision: 3);
